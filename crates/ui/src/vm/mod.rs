mod console_vm;
mod home_vm;
mod topic_index_vm;

pub use console_vm::{
    COMPLETED_STATUS_TEXT, COMPLETION_NOTICE, COMPLETION_NOTICE_TEXT, ConsoleVm, FEEDBACK_FADE,
    FEEDBACK_VISIBLE, FeedbackPhase, FeedbackVm, SUCCESS_HIGHLIGHT, enter_submits,
};
pub use home_vm::TopicCardVm;
pub use topic_index_vm::{
    COMPLETED_BUTTON_LABEL, COMPLETED_BUTTON_STYLE, COMPLETION_BADGE, LessonCardVm, TopicIndexVm,
    map_topic_index,
};
