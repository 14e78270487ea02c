//! [`Prompter`] implementations: flags-only and interactive.

use spark_core::{
    application::{PromptRequest, Prompter},
    domain::{DomainError, Framework, ModuleKey, ScaffoldAnswers, Variant},
    error::SparkResult,
};

use crate::cli::ScaffoldArgs;

/// Answers given on the command line; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presets {
    pub key: Option<String>,
    pub name: Option<String>,
    pub variant: Option<Variant>,
    pub framework: Option<Framework>,
}

impl From<&ScaffoldArgs> for Presets {
    fn from(args: &ScaffoldArgs) -> Self {
        Self {
            key: args.key.clone(),
            name: args.name.clone(),
            variant: args.variant.map(Variant::from),
            framework: args.framework.map(Framework::from),
        }
    }
}

/// The text shown before anything is written.
pub fn summary(answers: &ScaffoldAnswers) -> String {
    format!(
        "About to create SPA:\n\n  SPA Key:   {}\n  SPA Name:  {}\n  SPA Type:  {}\n  Framework: {}\n",
        answers.key,
        answers.name,
        answers.variant.label(),
        answers.framework.label(),
    )
}

// ── non-interactive ──────────────────────────────────────────────────────────

/// Takes everything from flags and configured defaults; never asks.
#[derive(Debug)]
pub struct ArgsPrompter {
    presets: Presets,
}

impl ArgsPrompter {
    pub fn new(presets: Presets) -> Self {
        Self { presets }
    }
}

impl Prompter for ArgsPrompter {
    fn collect(&self, request: &PromptRequest) -> SparkResult<ScaffoldAnswers> {
        let raw_key = self
            .presets
            .key
            .as_deref()
            .ok_or(DomainError::MissingRequiredField { field: "key" })?;
        let key = ModuleKey::parse(raw_key)?;
        let name = self
            .presets
            .name
            .clone()
            .unwrap_or_else(|| key.to_string());
        let variant = self
            .presets
            .variant
            .or(request.default_variant)
            .ok_or(DomainError::MissingRequiredField { field: "variant" })?;
        let framework = self.presets.framework.unwrap_or(request.default_framework);

        Ok(ScaffoldAnswers {
            key,
            name,
            variant,
            framework,
        })
    }
}

// ── interactive ──────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
pub use interactive::DialoguerPrompter;

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

    use spark_core::{
        application::{ApplicationError, PromptRequest, Prompter},
        domain::{Framework, ModuleKey, ScaffoldAnswers},
        error::{SparkError, SparkResult},
    };

    use super::{Presets, summary};

    /// Asks for whatever the flags left open, then for confirmation.
    pub struct DialoguerPrompter {
        presets: Presets,
        theme: ColorfulTheme,
    }

    impl DialoguerPrompter {
        pub fn new(presets: Presets) -> Self {
            Self {
                presets,
                theme: ColorfulTheme::default(),
            }
        }

        fn ask_key(&self) -> SparkResult<ModuleKey> {
            if let Some(raw) = &self.presets.key {
                return Ok(ModuleKey::parse(raw)?);
            }
            let raw: String = Input::with_theme(&self.theme)
                .with_prompt("SPA Key")
                .validate_with(|input: &String| -> Result<(), String> {
                    ModuleKey::parse(input).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_failed)?;
            Ok(ModuleKey::parse(&raw)?)
        }

        fn ask_name(&self, key: &ModuleKey) -> SparkResult<String> {
            if let Some(name) = &self.presets.name {
                return Ok(name.clone());
            }
            Input::with_theme(&self.theme)
                .with_prompt("SPA Name")
                .default(key.to_string())
                .interact_text()
                .map_err(prompt_failed)
        }
    }

    impl Prompter for DialoguerPrompter {
        fn collect(&self, request: &PromptRequest) -> SparkResult<ScaffoldAnswers> {
            let key = self.ask_key()?;
            let name = self.ask_name(&key)?;

            let variant = match self.presets.variant {
                Some(variant) => variant,
                None => {
                    let variants = request.variants();
                    let labels: Vec<&str> = variants.iter().map(|v| v.label()).collect();
                    let default = request
                        .default_variant
                        .and_then(|d| variants.iter().position(|v| *v == d))
                        .unwrap_or(0);
                    let picked = Select::with_theme(&self.theme)
                        .with_prompt("SPA Type")
                        .items(&labels)
                        .default(default)
                        .interact()
                        .map_err(prompt_failed)?;
                    variants[picked]
                }
            };

            let framework = match self.presets.framework {
                Some(framework) => framework,
                None => {
                    let labels: Vec<&str> = Framework::ALL.iter().map(|f| f.label()).collect();
                    let default = Framework::ALL
                        .iter()
                        .position(|f| *f == request.default_framework)
                        .unwrap_or(0);
                    let picked = Select::with_theme(&self.theme)
                        .with_prompt("Framework")
                        .items(&labels)
                        .default(default)
                        .interact()
                        .map_err(prompt_failed)?;
                    Framework::ALL[picked]
                }
            };

            let answers = ScaffoldAnswers {
                key,
                name,
                variant,
                framework,
            };

            let confirmed = Confirm::with_theme(&self.theme)
                .with_prompt(format!("{}\nOk?", summary(&answers)))
                .default(true)
                .interact()
                .map_err(prompt_failed)?;
            if !confirmed {
                return Err(ApplicationError::Cancelled.into());
            }
            Ok(answers)
        }
    }

    fn prompt_failed(e: dialoguer::Error) -> SparkError {
        SparkError::Internal {
            message: format!("prompt failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_core::domain::HostApplication;

    fn request(default_variant: Option<Variant>) -> PromptRequest {
        PromptRequest {
            host: HostApplication::Confluence,
            default_variant,
            default_framework: Framework::React,
        }
    }

    fn presets(key: Option<&str>, variant: Option<Variant>) -> Presets {
        Presets {
            key: key.map(str::to_string),
            variant,
            ..Presets::default()
        }
    }

    #[test]
    fn name_and_framework_fall_back() {
        let prompter = ArgsPrompter::new(presets(Some("team-admin"), Some(Variant::Admin)));
        let answers = prompter.collect(&request(None)).unwrap();
        assert_eq!(answers.key.as_str(), "team-admin");
        assert_eq!(answers.name, "team-admin");
        assert_eq!(answers.variant, Variant::Admin);
        assert_eq!(answers.framework, Framework::React);
    }

    #[test]
    fn configured_variant_is_used() {
        let prompter = ArgsPrompter::new(presets(Some("popup"), None));
        let answers = prompter.collect(&request(Some(Variant::Dialog))).unwrap();
        assert_eq!(answers.variant, Variant::Dialog);
    }

    #[test]
    fn flag_beats_configured_variant() {
        let prompter = ArgsPrompter::new(presets(Some("popup"), Some(Variant::Space)));
        let answers = prompter.collect(&request(Some(Variant::Dialog))).unwrap();
        assert_eq!(answers.variant, Variant::Space);
    }

    #[test]
    fn key_is_required() {
        let err = ArgsPrompter::new(presets(None, Some(Variant::Admin)))
            .collect(&request(None))
            .unwrap_err();
        assert!(err.to_string().contains("key"), "{err}");
    }

    #[test]
    fn variant_is_required_without_default() {
        let err = ArgsPrompter::new(presets(Some("x"), None))
            .collect(&request(None))
            .unwrap_err();
        assert!(err.to_string().contains("variant"), "{err}");
    }

    #[test]
    fn bad_key_is_rejected() {
        assert!(
            ArgsPrompter::new(presets(Some("has space"), Some(Variant::Admin)))
                .collect(&request(None))
                .is_err()
        );
    }

    #[test]
    fn summary_uses_labels() {
        let answers = ScaffoldAnswers {
            key: ModuleKey::parse("team-admin").unwrap(),
            name: "Team Admin".into(),
            variant: Variant::Space,
            framework: Framework::Angular1,
        };
        let text = summary(&answers);
        assert!(text.starts_with("About to create SPA:"));
        assert!(text.contains("SPA Key:   team-admin"));
        assert!(text.contains("SPA Name:  Team Admin"));
        assert!(text.contains("Space App (Confluence-only)"));
        assert!(text.contains("AngularJS 1.x"));
    }
}
