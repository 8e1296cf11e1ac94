pub mod messages;
pub mod types;

pub use messages::{AlertNotice, ChatEntry, ClientMessage, RoomState, ServerMessage};
pub use types::{
    AnalysisReport, AnswerResponse, Alert, ClauseOverlap, ComparisonResult, ContractType,
    EntityBundle, EntityReport,
};
