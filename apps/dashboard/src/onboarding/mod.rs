//! Onboarding wizard: the step machine that builds a persona profile.
//!
//! Collection pages never learn wizard position — they receive navigation as
//! an injected [`WizardNav`] collaborator and call `next`/`back`/`skip`
//! blindly. The wizard itself owns which step is current and which steps
//! were completed or skipped.

use std::collections::HashSet;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Basics,
    WorkHistory,
    Accomplishments,
    Certifications,
    Filters,
    Review,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 6] = [
        OnboardingStep::Basics,
        OnboardingStep::WorkHistory,
        OnboardingStep::Accomplishments,
        OnboardingStep::Certifications,
        OnboardingStep::Filters,
        OnboardingStep::Review,
    ];

    pub fn next(self) -> Option<Self> {
        let position = Self::ALL.iter().position(|s| *s == self)?;
        Self::ALL.get(position + 1).copied()
    }

    pub fn back(self) -> Option<Self> {
        let position = Self::ALL.iter().position(|s| *s == self)?;
        position.checked_sub(1).map(|p| Self::ALL[p])
    }

    pub fn title(self) -> &'static str {
        match self {
            OnboardingStep::Basics => "About you",
            OnboardingStep::WorkHistory => "Work history",
            OnboardingStep::Accomplishments => "Accomplishments",
            OnboardingStep::Certifications => "Certifications",
            OnboardingStep::Filters => "Search filters",
            OnboardingStep::Review => "Review",
        }
    }
}

/// Navigation callbacks handed to step pages. Implementations decide what
/// "next" means; pages only announce the user's intent.
pub trait WizardNav: Send + Sync {
    fn next(&self);
    fn back(&self);
    fn skip(&self);
}

/// Wizard position and per-step completion state.
#[derive(Debug)]
pub struct OnboardingWizard {
    current: OnboardingStep,
    completed: HashSet<OnboardingStep>,
    skipped: HashSet<OnboardingStep>,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self {
            current: OnboardingStep::Basics,
            completed: HashSet::new(),
            skipped: HashSet::new(),
        }
    }

    pub fn current(&self) -> OnboardingStep {
        self.current
    }

    /// 1-based position of the current step, with the total.
    pub fn progress(&self) -> (usize, usize) {
        let position = OnboardingStep::ALL
            .iter()
            .position(|s| *s == self.current)
            .unwrap_or(0);
        (position + 1, OnboardingStep::ALL.len())
    }

    pub fn is_completed(&self, step: OnboardingStep) -> bool {
        self.completed.contains(&step)
    }

    pub fn is_skipped(&self, step: OnboardingStep) -> bool {
        self.skipped.contains(&step)
    }

    /// Marks the current step done and moves forward. At the last step this
    /// is a no-op move (the shell leaves the wizard on completion).
    pub fn advance(&mut self) {
        self.completed.insert(self.current);
        self.skipped.remove(&self.current);
        if let Some(next) = self.current.next() {
            self.current = next;
        }
    }

    /// Moves forward without marking the step complete, so the review page
    /// can point back at what was left out.
    pub fn skip(&mut self) {
        if !self.completed.contains(&self.current) {
            self.skipped.insert(self.current);
        }
        if let Some(next) = self.current.next() {
            self.current = next;
        }
    }

    /// Moves backward; completion state is kept so re-visiting a finished
    /// step does not un-finish it.
    pub fn back(&mut self) {
        if let Some(back) = self.current.back() {
            self.current = back;
        }
    }
}

/// Shells share the wizard behind a mutex; the blind navigation callbacks
/// route to it here.
impl WizardNav for Mutex<OnboardingWizard> {
    fn next(&self) {
        if let Ok(mut wizard) = self.lock() {
            wizard.advance();
        }
    }

    fn back(&self) {
        if let Ok(mut wizard) = self.lock() {
            wizard.back();
        }
    }

    fn skip(&self) {
        if let Ok(mut wizard) = self.lock() {
            wizard.skip();
        }
    }
}
