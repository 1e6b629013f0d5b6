mod copier;
mod store;
mod walker;

pub use copier::FsCopier;
pub use store::FsBackupStore;
pub use walker::FsEnumerator;
