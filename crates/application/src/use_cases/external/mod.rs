pub mod answer_query;
pub mod resolve;
pub mod transfer_zone;

pub use answer_query::{AnswerExternalQueryUseCase, ExternalAnswer};
pub use resolve::{ExternalResolution, ResolveExternalUseCase};
pub use transfer_zone::{TransferStream, TransferZoneUseCase};
