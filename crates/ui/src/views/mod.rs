mod home;
mod lesson;
mod state;
mod topic_index;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use lesson::LessonView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use topic_index::TopicIndexView;
