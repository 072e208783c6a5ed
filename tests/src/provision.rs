mod failures;
mod pipeline;
