//! Record schema for research options and the selections made against them

pub mod types;

pub use types::{
    DomainBlock, PersonalStatement, ResearchOption, ResearchRequest, UserSelection,
    MAX_MATCH_SCORE, MIN_MATCH_SCORE, OPTIONS_PER_RESPONSE,
};
