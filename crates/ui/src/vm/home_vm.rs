use services::TopicEntry;
use tutorial_core::model::{CompletionSet, ProgressSummary, TopicId, TutorialPath};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicCardVm {
    pub topic: TopicId,
    pub title: String,
    pub description: String,
    pub href: String,
    pub summary_text: String,
}

impl TopicCardVm {
    #[must_use]
    pub fn new(topic: &TopicEntry, completed: &CompletionSet) -> Self {
        let summary = ProgressSummary::compute(completed.len(), topic.lessons.len());
        Self {
            topic: topic.id.clone(),
            title: topic.title.clone(),
            description: topic.description.clone(),
            href: TutorialPath::index_path(&topic.id),
            summary_text: summary.summary_text(),
        }
    }
}
