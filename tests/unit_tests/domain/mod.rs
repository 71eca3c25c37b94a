mod narration_test;
mod pipeline_test;
