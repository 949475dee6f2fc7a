pub mod providers;

pub use providers::{
    BackendProvider, DetailProvider, RecommendationProvider, SynthesizedDetailProvider,
};
