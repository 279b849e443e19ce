use std::time::Duration;

use chrono::{DateTime, Utc};
use services::{Feedback, FeedbackTone, MarkOutcome, SubmissionOutcome};
use tutorial_core::model::{ConsoleMode, LessonId, TopicId, normalize_command};

/// How long feedback stays fully visible.
pub const FEEDBACK_VISIBLE: Duration = Duration::from_secs(5);
/// Fade-out that follows the visible period.
pub const FEEDBACK_FADE: Duration = Duration::from_millis(500);
/// Input border flash after a correct answer.
pub const SUCCESS_HIGHLIGHT: Duration = Duration::from_secs(3);
/// Lifetime of the "lesson completed" notification.
pub const COMPLETION_NOTICE: Duration = Duration::from_secs(3);

pub const COMPLETION_NOTICE_TEXT: &str = "Lesson completed!";
pub const COMPLETED_STATUS_TEXT: &str = "✅ Completed";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackPhase {
    Visible,
    Fading,
    Hidden,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub message: String,
    pub tone: FeedbackTone,
    shown_at: DateTime<Utc>,
}

impl FeedbackVm {
    fn new(feedback: Feedback, now: DateTime<Utc>) -> Self {
        Self {
            message: feedback.message,
            tone: feedback.tone,
            shown_at: now,
        }
    }

    fn fade_at(&self) -> DateTime<Utc> {
        self.shown_at + delta(FEEDBACK_VISIBLE)
    }

    fn hide_at(&self) -> DateTime<Utc> {
        self.fade_at() + delta(FEEDBACK_FADE)
    }

    #[must_use]
    pub fn phase(&self, now: DateTime<Utc>) -> FeedbackPhase {
        if now < self.fade_at() {
            FeedbackPhase::Visible
        } else if now < self.hide_at() {
            FeedbackPhase::Fading
        } else {
            FeedbackPhase::Hidden
        }
    }

    /// Class list for the feedback element.
    #[must_use]
    pub fn class(&self, now: DateTime<Utc>) -> String {
        match self.phase(now) {
            FeedbackPhase::Visible => format!("feedback {}", self.tone.class()),
            FeedbackPhase::Fading => format!("feedback {} fading", self.tone.class()),
            FeedbackPhase::Hidden => "feedback".to_string(),
        }
    }
}

/// State of the interactive console on one lesson page.
///
/// Timed effects are stored as deadlines and evaluated against a caller
/// supplied `now`, so a newer message is never cleared by an older timer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleVm {
    topic: TopicId,
    lesson: LessonId,
    mode: ConsoleMode,
    multiline: bool,
    in_flight: bool,
    output: Option<String>,
    feedback: Option<FeedbackVm>,
    highlight_until: Option<DateTime<Utc>>,
    completed: bool,
    notice_until: Option<DateTime<Utc>>,
}

impl ConsoleVm {
    #[must_use]
    pub fn new(topic: TopicId, lesson: LessonId, mode: ConsoleMode, multiline: bool) -> Self {
        Self {
            topic,
            lesson,
            mode,
            multiline,
            in_flight: false,
            output: None,
            feedback: None,
            highlight_until: None,
            completed: false,
            notice_until: None,
        }
    }

    #[must_use]
    pub fn topic(&self) -> &TopicId {
        &self.topic
    }

    #[must_use]
    pub fn lesson(&self) -> &LessonId {
        &self.lesson
    }

    #[must_use]
    pub fn mode(&self) -> ConsoleMode {
        self.mode
    }

    #[must_use]
    pub fn multiline(&self) -> bool {
        self.multiline
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.in_flight {
            self.mode.in_flight_label()
        } else {
            self.mode.resting_label()
        }
    }

    #[must_use]
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Status loaded from the completion store when the page opens.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = self.completed || completed;
    }

    /// Start a submission. Returns `false` when nothing should be sent:
    /// a request is already outstanding, or the input is blank (in which case
    /// the validation message is shown).
    pub fn begin_submit(&mut self, raw_command: &str, now: DateTime<Utc>) -> bool {
        if self.in_flight {
            return false;
        }
        if normalize_command(raw_command).is_none() {
            self.show_feedback(Feedback::error(self.mode.empty_input_message()), now);
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Apply the result of a submission and re-enable the control.
    pub fn finish_submit(&mut self, outcome: SubmissionOutcome, now: DateTime<Utc>) {
        self.in_flight = false;
        match outcome {
            SubmissionOutcome::Rejected { feedback } | SubmissionOutcome::Failed { feedback } => {
                self.show_feedback(feedback, now);
            }
            SubmissionOutcome::Answered {
                output,
                feedback,
                highlight,
                completion,
            } => {
                self.output = Some(output);
                if let Some(feedback) = feedback {
                    self.show_feedback(feedback, now);
                }
                if highlight {
                    self.highlight_until = Some(now + delta(SUCCESS_HIGHLIGHT));
                }
                match completion {
                    Some(MarkOutcome::NewlyCompleted) => {
                        self.completed = true;
                        self.notice_until = Some(now + delta(COMPLETION_NOTICE));
                    }
                    Some(MarkOutcome::AlreadyCompleted) => self.completed = true,
                    None => {}
                }
            }
        }
    }

    fn show_feedback(&mut self, feedback: Feedback, now: DateTime<Utc>) {
        self.feedback = Some(FeedbackVm::new(feedback, now));
    }

    /// Feedback that is visible or fading at `now`.
    #[must_use]
    pub fn feedback(&self, now: DateTime<Utc>) -> Option<&FeedbackVm> {
        self.feedback
            .as_ref()
            .filter(|feedback| feedback.phase(now) != FeedbackPhase::Hidden)
    }

    #[must_use]
    pub fn is_highlighted(&self, now: DateTime<Utc>) -> bool {
        self.highlight_until.is_some_and(|until| now < until)
    }

    #[must_use]
    pub fn shows_completion_notice(&self, now: DateTime<Utc>) -> bool {
        self.notice_until.is_some_and(|until| now < until)
    }

    /// Drop effects that have run out. Returns whether anything changed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        let mut changed = false;
        if self
            .feedback
            .as_ref()
            .is_some_and(|feedback| feedback.phase(now) == FeedbackPhase::Hidden)
        {
            self.feedback = None;
            changed = true;
        }
        if self.highlight_until.is_some_and(|until| now >= until) {
            self.highlight_until = None;
            changed = true;
        }
        if self.notice_until.is_some_and(|until| now >= until) {
            self.notice_until = None;
            changed = true;
        }
        changed
    }

    /// Time until the next visual change, if any effect is pending.
    #[must_use]
    pub fn next_deadline(&self, now: DateTime<Utc>) -> Option<Duration> {
        let feedback = self
            .feedback
            .iter()
            .flat_map(|feedback| [feedback.fade_at(), feedback.hide_at()]);
        feedback
            .chain(self.highlight_until)
            .chain(self.notice_until)
            .filter(|deadline| *deadline > now)
            .min()
            .and_then(|deadline| (deadline - now).to_std().ok())
    }
}

/// Enter submits single-line inputs; multi-line inputs need Ctrl or Cmd.
#[must_use]
pub fn enter_submits(multiline: bool, ctrl_or_meta: bool) -> bool {
    !multiline || ctrl_or_meta
}

fn delta(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero())
}
