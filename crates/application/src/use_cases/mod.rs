pub mod external;

pub use external::{
    AnswerExternalQueryUseCase, ExternalAnswer, ExternalResolution, ResolveExternalUseCase,
    TransferStream, TransferZoneUseCase,
};
