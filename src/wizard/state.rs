// ABOUTME: State machine for the four-step card creation wizard
// Tracks the current step, the forward path taken, and the per-step advance gate

/// Steps in the card creation wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Input,
    Split,
    Generate,
    Download,
}

/// Static descriptor for one wizard step, used by the step indicator
#[derive(Debug, Clone, Copy)]
pub struct StepInfo {
    pub number: usize,
    pub title: &'static str,
    pub description: &'static str,
}

impl Step {
    /// Get all steps in order
    pub fn all() -> &'static [Step] {
        &[Self::Input, Self::Split, Self::Generate, Self::Download]
    }

    /// Get the step number (1-indexed for display)
    pub fn number(&self) -> usize {
        match self {
            Self::Input => 1,
            Self::Split => 2,
            Self::Generate => 3,
            Self::Download => 4,
        }
    }

    /// Get the total number of steps
    pub fn total() -> usize {
        4
    }

    /// Get display title for this step
    pub fn title(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Split => "Split",
            Self::Generate => "Generate",
            Self::Download => "Download",
        }
    }

    /// Get description for this step
    pub fn description(&self) -> &'static str {
        match self {
            Self::Input => "Enter or paste the text to convert",
            Self::Split => "Break the text into card-sized segments",
            Self::Generate => "Pick a template and generate images",
            Self::Download => "Review and save the generated cards",
        }
    }

    /// Get the next step, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Input => Some(Self::Split),
            Self::Split => Some(Self::Generate),
            Self::Generate => Some(Self::Download),
            Self::Download => None,
        }
    }

    fn info(&self) -> StepInfo {
        StepInfo {
            number: self.number(),
            title: self.title(),
            description: self.description(),
        }
    }
}

/// Navigation state for the wizard.
///
/// All transitions go through this struct so that the current step can never
/// desynchronize from the path taken, and so that no step can be left before
/// its own validation gate passes. Guard failures are silent no-ops: an
/// attempted invalid transition is a disabled-control concern for the view
/// layer, not a fault. Every operation reports whether it was applied.
#[derive(Debug, Clone)]
pub struct StepWizard {
    current: Step,
    history: Vec<Step>,
    can_advance: bool,
}

impl StepWizard {
    pub fn new() -> Self {
        Self {
            current: Step::Input,
            history: vec![Step::Input],
            can_advance: false,
        }
    }

    /// The step currently on screen
    pub fn current_step(&self) -> Step {
        self.current
    }

    /// The ordered path of steps visited forward from the first.
    /// Non-empty; its last element always equals the current step.
    pub fn history(&self) -> &[Step] {
        &self.history
    }

    /// Whether the active step has unlocked forward progress
    pub fn can_advance(&self) -> bool {
        self.can_advance
    }

    /// Whether there is a previous step to return to
    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Static step descriptors for rendering the indicator
    pub fn catalog() -> Vec<StepInfo> {
        Step::all().iter().map(Step::info).collect()
    }

    /// Move forward one step. Requires the advance gate to be open and a
    /// next step to exist. The new step starts locked and must re-validate
    /// independently. Returns whether the transition was applied.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance {
            return false;
        }
        let Some(next) = self.current.next() else {
            return false;
        };
        self.current = next;
        self.history.push(next);
        self.can_advance = false;
        true
    }

    /// Return to the previous step by popping the current one off the path.
    /// A revisited step is assumed already valid, so the gate reopens.
    /// No-op at the first step.
    pub fn retreat(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        // Non-empty by the guard above
        self.current = *self.history.last().unwrap_or(&Step::Input);
        self.can_advance = true;
        true
    }

    /// Jump directly to a step. Only the first step or a step already on the
    /// visited path is reachable; forward entries beyond the target are
    /// discarded, so there is no redo after a jump. Jumping to the first step
    /// always collapses the path to just that step.
    pub fn jump_to(&mut self, target: Step) -> bool {
        if target == Step::Input {
            self.history = vec![Step::Input];
        } else {
            let Some(pos) = self.history.iter().position(|s| *s == target) else {
                return false;
            };
            self.history.truncate(pos + 1);
        }
        self.current = target;
        self.can_advance = target.next().is_some();
        true
    }

    /// Open or close the forward gate for the active step. This is the sole
    /// channel by which a step unlocks forward progress; each step's view
    /// calls it whenever its local validity changes.
    pub fn set_advance_ready(&mut self, ready: bool) {
        self.can_advance = ready;
    }

    /// Restore the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for StepWizard {
    fn default() -> Self {
        Self::new()
    }
}
