//! The onboarding/profile wizard.
//!
//! Steps are an explicit enum and every move goes through [`transition`], a
//! pure function of the layout, the current step and the action. [`Wizard`]
//! wraps it with the draft record and the two side effects: persisting the
//! chosen role right away, and writing the whole record plus navigating on
//! finish.

use mentorhub_store::{keys, SettingsStore};
use tracing::{debug, info};

use crate::error::AppError;
use crate::multi_select::{pills, MultiSelect};
use crate::preferences::{MaxMentees, MultiField, PreferenceRecord};
use crate::role::{stored_role, Role};
use crate::router::{Navigator, Route};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WizardStep {
    SelectRole,
    /// Regions and languages.
    Location,
    /// Business functions.
    Expertise,
    /// Strengths, plus the mentee limit for mentors.
    Strengths,
    /// Summary and free text.
    Review,
}

impl WizardStep {
    const ALL: [Self; 5] = [
        Self::SelectRole,
        Self::Location,
        Self::Expertise,
        Self::Strengths,
        Self::Review,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SelectRole => "Choose your role",
            Self::Location => "Where are you located?",
            Self::Expertise => "Tell us about your expertise",
            Self::Strengths => "What are your strengths?",
            Self::Review => "Review your profile",
        }
    }
}

/// Which optional steps a wizard has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WizardLayout {
    /// Entered from the top-level onboarding entry point.
    pub role_selection: bool,
    pub review: bool,
}

impl WizardLayout {
    pub const COMPACT: Self = Self {
        role_selection: false,
        review: false,
    };
    pub const ONBOARDING: Self = Self {
        role_selection: true,
        review: true,
    };
    pub const PROFILE: Self = Self {
        role_selection: false,
        review: true,
    };

    const fn includes(self, step: WizardStep) -> bool {
        match step {
            WizardStep::SelectRole => self.role_selection,
            WizardStep::Review => self.review,
            WizardStep::Location | WizardStep::Expertise | WizardStep::Strengths => true,
        }
    }

    #[must_use]
    pub fn steps(self) -> Vec<WizardStep> {
        WizardStep::ALL
            .into_iter()
            .filter(|step| self.includes(*step))
            .collect()
    }

    #[must_use]
    pub const fn first(self) -> WizardStep {
        if self.role_selection {
            WizardStep::SelectRole
        } else {
            WizardStep::Location
        }
    }

    #[must_use]
    pub const fn last(self) -> WizardStep {
        if self.review {
            WizardStep::Review
        } else {
            WizardStep::Strengths
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Back,
    Finish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    To(WizardStep),
    Finished,
}

/// `Back` on the first step stays there. `Next` on the last step and
/// `Finish` anywhere else are errors, as is leaving role selection (or
/// finishing) without a role.
pub fn transition(
    layout: WizardLayout,
    step: WizardStep,
    action: WizardAction,
    role_chosen: bool,
) -> Result<Transition, AppError> {
    let steps = layout.steps();
    let Some(index) = steps.iter().position(|candidate| *candidate == step) else {
        return Err(AppError::StepNotInLayout(step));
    };
    let is_last = index + 1 == steps.len();
    match action {
        WizardAction::Back => Ok(Transition::To(steps[index.saturating_sub(1)])),
        WizardAction::Next if is_last => Err(AppError::NextUnavailable),
        WizardAction::Next if step == WizardStep::SelectRole && !role_chosen => {
            Err(AppError::RoleRequired)
        }
        WizardAction::Next => Ok(Transition::To(steps[index + 1])),
        WizardAction::Finish if !is_last => Err(AppError::NotAtFinalStep),
        WizardAction::Finish if !role_chosen => Err(AppError::RoleRequired),
        WizardAction::Finish => Ok(Transition::Finished),
    }
}

/// What a renderer shows on a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Role,
    Multi(MultiField),
    OtherLanguages,
    MaxMentees,
    Summary,
    AdditionalInfo,
}

pub struct Wizard<S, N> {
    store: S,
    navigator: N,
    layout: WizardLayout,
    step: WizardStep,
    role: Option<Role>,
    draft: PreferenceRecord,
    max_mentees: MaxMentees,
}

impl<S: SettingsStore, N: Navigator> Wizard<S, N> {
    /// Starts on the first step with whatever was saved before. A stored
    /// record that does not parse starts the form empty.
    pub fn open(store: S, navigator: N, layout: WizardLayout) -> Result<Self, AppError> {
        let role = stored_role(&store, keys::SELECTED_ROLE)?;
        let mut draft = PreferenceRecord::load(&store)?;
        let max_mentees = draft.max_mentees.take().unwrap_or_default();
        debug!("opened wizard {layout:?} as {role:?}");
        Ok(Self {
            store,
            navigator,
            layout,
            step: layout.first(),
            role,
            draft,
            max_mentees,
        })
    }

    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// `(current, total)`, counting from one.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let steps = self.layout.steps();
        let current = steps
            .iter()
            .position(|step| *step == self.step)
            .map_or(1, |index| index + 1);
        (current, steps.len())
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.step != self.layout.first()
    }

    /// Whether the primary button reads "Finish" instead of "Next".
    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step == self.layout.last()
    }

    /// Remembers the role immediately, even if the wizard is abandoned later.
    pub fn choose_role(&mut self, role: Role) -> Result<(), AppError> {
        self.store.set(keys::SELECTED_ROLE, role.as_str())?;
        info!("role {role} chosen");
        self.role = Some(role);
        Ok(())
    }

    pub fn next(&mut self) -> Result<WizardStep, AppError> {
        self.apply(WizardAction::Next)
    }

    pub fn back(&mut self) -> Result<WizardStep, AppError> {
        self.apply(WizardAction::Back)
    }

    fn apply(&mut self, action: WizardAction) -> Result<WizardStep, AppError> {
        match transition(self.layout, self.step, action, self.role.is_some())? {
            Transition::To(step) => {
                debug!("{:?} --{action:?}--> {step:?}", self.step);
                self.step = step;
                Ok(step)
            }
            Transition::Finished => Err(AppError::NotAtFinalStep),
        }
    }

    /// Writes the whole record in one go and heads to the role's dashboard.
    pub fn finish(&mut self) -> Result<PreferenceRecord, AppError> {
        transition(
            self.layout,
            self.step,
            WizardAction::Finish,
            self.role.is_some(),
        )?;
        let role = self.role.ok_or(AppError::RoleRequired)?;
        let record = self.record();
        record.save(&self.store)?;
        info!("profile saved for {role}");
        self.navigator.push(Route::RoleDashboard(role));
        Ok(record)
    }

    /// The record as it would be saved right now.
    #[must_use]
    pub fn record(&self) -> PreferenceRecord {
        let mut record = self.draft.clone();
        record.max_mentees = Some(self.max_mentees);
        match self.role {
            Some(role) => record.for_role(role),
            None => record.for_role(Role::Mentee),
        }
    }

    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        match self.step {
            WizardStep::SelectRole => vec![Field::Role],
            WizardStep::Location => {
                let mut fields = vec![
                    Field::Multi(MultiField::Regions),
                    Field::Multi(MultiField::Languages),
                ];
                if self.shows_other_languages() {
                    fields.push(Field::OtherLanguages);
                }
                fields
            }
            WizardStep::Expertise => vec![Field::Multi(MultiField::Functions)],
            WizardStep::Strengths => {
                let mut fields = vec![Field::Multi(MultiField::Strengths)];
                if self.shows_max_mentees() {
                    fields.push(Field::MaxMentees);
                }
                fields
            }
            WizardStep::Review => vec![Field::Summary, Field::AdditionalInfo],
        }
    }

    #[must_use]
    pub fn selection(&self, field: MultiField) -> &[String] {
        self.draft.selection(field)
    }

    pub fn toggle(&mut self, field: MultiField, value: &str) -> Result<bool, AppError> {
        MultiSelect::new(field.catalog(), self.draft.selection_mut(field)).toggle(value)
    }

    pub fn remove_pill(&mut self, field: MultiField, value: &str) {
        MultiSelect::new(field.catalog(), self.draft.selection_mut(field)).remove(value);
    }

    #[must_use]
    pub fn pills(&self, field: MultiField) -> Vec<&str> {
        pills(field.catalog(), self.selection(field))
    }

    #[must_use]
    pub fn shows_other_languages(&self) -> bool {
        self.draft.wants_other_languages()
    }

    /// Kept while hidden, so re-selecting "other" brings the text back.
    #[must_use]
    pub fn other_languages(&self) -> &str {
        &self.draft.other_languages
    }

    pub fn set_other_languages(&mut self, text: impl Into<String>) {
        self.draft.other_languages = text.into();
    }

    #[must_use]
    pub fn shows_max_mentees(&self) -> bool {
        self.role == Some(Role::Mentor)
    }

    #[must_use]
    pub const fn max_mentees(&self) -> MaxMentees {
        self.max_mentees
    }

    /// Out-of-range input is rejected and the previous value kept.
    pub fn set_max_mentees(&mut self, input: &str) -> Result<MaxMentees, AppError> {
        self.max_mentees = input.parse()?;
        Ok(self.max_mentees)
    }

    #[must_use]
    pub fn additional_info(&self) -> &str {
        &self.draft.additional_info
    }

    pub fn set_additional_info(&mut self, text: impl Into<String>) {
        self.draft.additional_info = text.into();
    }

    /// Summary lines of the review step.
    #[must_use]
    pub fn review(&self) -> Vec<String> {
        [
            MultiField::Regions,
            MultiField::Languages,
            MultiField::Functions,
            MultiField::Strengths,
        ]
        .into_iter()
        .map(|field| {
            let pills = self.pills(field);
            let name = match field {
                MultiField::Functions => "Functions",
                other => other.label(),
            };
            if pills.is_empty() {
                format!("{name}: None")
            } else {
                format!("{name}: {}", pills.join(", "))
            }
        })
        .collect()
    }
}
