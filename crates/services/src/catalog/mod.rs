mod demo;
mod service;
mod source;

pub use demo::demo_exercises;
pub use service::{CatalogService, DEFAULT_LIST_LIMIT};
pub use source::{
    CatalogConfig, DEFAULT_EXERCISES_URL, ExerciseSource, RemoteExercise, RemoteExerciseSource,
    SourceQuery, image_url, map_remote, map_remote_rows,
};
