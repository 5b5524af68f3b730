//! Lesson types, re-exported from `lessonhub-models`.

pub use lessonhub_models::lessons::{
    CreateLessonDto, Lesson, LessonWithStats, NewLesson, UpdateLessonDto,
};
