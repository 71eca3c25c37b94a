mod narration_store;

pub use narration_store::NarrationStore;
