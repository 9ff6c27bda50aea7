//! Tableau build options (§4.5, SPEC_FULL §1 "Configuration").

use crate::error::ConfigError;

/// Build/step configuration for [`crate::proof::Tableau::open`].
///
/// Validated at construction via [`Options::build`] rather than left to
/// fail silently mid-build: a tableau with neither a step cap nor a timeout
/// cap can only be stopped by exhausting every rule, which is fine for
/// terminating logics but is explicitly flagged by `ValueConflict` when
/// both caps are `None`, since the two together are the only termination
/// backstop spec.md's timeout/steps-exhausted semantics describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub max_steps: Option<usize>,
    pub build_timeout_ms: Option<u64>,
    pub is_build_models: bool,
    pub is_group_optim: bool,
    pub is_rank_optim: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_steps: Some(100_000),
            build_timeout_ms: Some(30_000),
            is_build_models: true,
            is_group_optim: true,
            is_rank_optim: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsBuilder {
    max_steps: Option<usize>,
    build_timeout_ms: Option<u64>,
    is_build_models: Option<bool>,
    is_group_optim: Option<bool>,
    is_rank_optim: Option<bool>,
    no_max_steps: bool,
    no_timeout: bool,
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }
}

impl OptionsBuilder {
    pub fn max_steps(mut self, n: usize) -> Self {
        self.max_steps = Some(n);
        self
    }

    pub fn no_max_steps(mut self) -> Self {
        self.no_max_steps = true;
        self
    }

    pub fn build_timeout_ms(mut self, ms: u64) -> Self {
        self.build_timeout_ms = Some(ms);
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.no_timeout = true;
        self
    }

    pub fn is_build_models(mut self, v: bool) -> Self {
        self.is_build_models = Some(v);
        self
    }

    pub fn is_group_optim(mut self, v: bool) -> Self {
        self.is_group_optim = Some(v);
        self
    }

    pub fn is_rank_optim(mut self, v: bool) -> Self {
        self.is_rank_optim = Some(v);
        self
    }

    pub fn build(self) -> Result<Options, ConfigError> {
        let defaults = Options::default();
        let max_steps = if self.no_max_steps {
            None
        } else {
            Some(self.max_steps.unwrap_or(defaults.max_steps.unwrap()))
        };
        let build_timeout_ms = if self.no_timeout {
            None
        } else {
            Some(
                self.build_timeout_ms
                    .unwrap_or(defaults.build_timeout_ms.unwrap()),
            )
        };
        if max_steps.is_none() && build_timeout_ms.is_none() {
            return Err(ConfigError::ValueConflict {
                key: "max_steps/build_timeout_ms".to_string(),
                old: "None".to_string(),
                new: "None".to_string(),
            });
        }
        Ok(Options {
            max_steps,
            build_timeout_ms,
            is_build_models: self.is_build_models.unwrap_or(defaults.is_build_models),
            is_group_optim: self.is_group_optim.unwrap_or(defaults.is_group_optim),
            is_rank_optim: self.is_rank_optim.unwrap_or(defaults.is_rank_optim),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert_eq!(Options::default().max_steps, Some(100_000));
    }

    #[test]
    fn no_caps_at_all_is_a_value_conflict() {
        let err = Options::builder()
            .no_max_steps()
            .no_timeout()
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValueConflict { .. }));
    }
}
