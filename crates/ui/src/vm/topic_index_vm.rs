use services::TopicEntry;
use services::catalog::START_LESSON_LABEL;
use tutorial_core::model::path::lesson_from_href;
use tutorial_core::model::{CompletionSet, LessonId, ProgressSummary, TopicId, TutorialPath};

pub const COMPLETION_BADGE: &str = "✅";
pub const COMPLETED_BUTTON_LABEL: &str = "✅ Completed";
pub const COMPLETED_BUTTON_STYLE: &str = "background-color: #5cb85c;";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCardVm {
    pub lesson: LessonId,
    pub title: String,
    pub concept: String,
    pub href: String,
    pub button_label: String,
    pub button_style: Option<&'static str>,
    pub badge: bool,
}

impl LessonCardVm {
    /// Restyle a card for a completed lesson. Only the stock button label is
    /// replaced; the badge is added once.
    fn mark_completed(&mut self) {
        if self.badge {
            return;
        }
        self.badge = true;
        if self.button_label == START_LESSON_LABEL {
            self.button_label = COMPLETED_BUTTON_LABEL.to_string();
            self.button_style = Some(COMPLETED_BUTTON_STYLE);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicIndexVm {
    pub topic: TopicId,
    pub title: String,
    pub description: String,
    pub cards: Vec<LessonCardVm>,
    pub progress: ProgressSummary,
}

impl TopicIndexVm {
    #[must_use]
    pub fn new(topic: &TopicEntry) -> Self {
        let cards: Vec<LessonCardVm> = topic
            .lessons
            .iter()
            .map(|lesson| LessonCardVm {
                lesson: lesson.id.clone(),
                title: lesson.title.clone(),
                concept: lesson.concept.clone(),
                href: TutorialPath::lesson_path(&topic.id, &lesson.id),
                button_label: lesson.button_label.clone(),
                button_style: None,
                badge: false,
            })
            .collect();
        let progress = ProgressSummary::compute(0, cards.len());
        Self {
            topic: topic.id.clone(),
            title: topic.title.clone(),
            description: topic.description.clone(),
            cards,
            progress,
        }
    }

    /// Recompute progress and decorate the cards whose link points at a
    /// completed lesson. Safe to call repeatedly.
    pub fn apply_completion(&mut self, completed: &CompletionSet) {
        self.progress = ProgressSummary::compute(completed.len(), self.cards.len());
        for card in &mut self.cards {
            let done = lesson_from_href(&card.href).is_some_and(|lesson| completed.contains(&lesson));
            if done {
                card.mark_completed();
            }
        }
    }

    #[must_use]
    pub fn bar_width(&self) -> String {
        self.progress.bar_width()
    }

    #[must_use]
    pub fn summary_text(&self) -> String {
        self.progress.summary_text()
    }
}

#[must_use]
pub fn map_topic_index(topic: &TopicEntry, completed: &CompletionSet) -> TopicIndexVm {
    let mut vm = TopicIndexVm::new(topic);
    vm.apply_completion(completed);
    vm
}
