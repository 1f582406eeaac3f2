//! Reservation book - lifecycle, capacity and table allocation
//!
//! # 模块结构
//!
//! ```text
//! reservations/
//! ├── storage.rs    # Persistence collaborator (JSON document / in-memory)
//! ├── store.rs      # In-memory book, persist-on-mutation with rollback
//! ├── capacity.rs   # Assigned / available tables per date
//! ├── allocator.rs  # Free-table computation and selection policy
//! ├── validator.rs  # Submission checks
//! ├── export.rs     # CSV export
//! └── manager/      # ReservationManager orchestration
//! ```

pub mod allocator;
pub mod capacity;
pub mod export;
pub mod manager;
pub mod storage;
pub mod store;
pub mod validator;

pub use allocator::{FirstFitSelector, RandomSelector, TableSelection, TableSelector};
pub use export::ExportOutcome;
pub use manager::{AssignOutcome, ManagerError, ManagerResult, ReservationManager};
pub use storage::{JsonFileStorage, MemoryStorage, ReservationPersistence, StorageError};
pub use store::ReservationStore;
pub use validator::{ValidationError, ValidationReason};
