use super::{
    api::{ClientError, PublishOutcome},
    prompts,
};

/// Where the generate flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Generating,
}

/// Where the publish flow currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PublishPhase {
    #[default]
    Idle,
    Publishing,
    Published { warning: Option<String> },
}

/// The create-post form state machine.
///
/// Generation and publication advance independently; each is gated so at
/// most one request of its kind is in flight. All transitions are pure, so
/// the machine can be driven by any frontend (here, the CLI).
#[derive(Debug, Default)]
pub struct CreateForm {
    name: String,
    prompt: String,
    photo: Option<String>,
    generation: GenerationPhase,
    publish: PublishPhase,
    error: Option<String>,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Replace the prompt with a random example different from the current
    /// value. Local only, no network call.
    pub fn surprise_me(&mut self) {
        self.prompt = prompts::random_prompt(&self.prompt).to_string();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation_phase(&self) -> GenerationPhase {
        self.generation
    }

    pub fn publish_phase(&self) -> &PublishPhase {
        &self.publish
    }

    /// Generate is available once a non-empty prompt exists and no
    /// generation is in flight
    pub fn can_generate(&self) -> bool {
        !self.prompt.trim().is_empty() && self.generation == GenerationPhase::Idle
    }

    /// Enter the generating state, clearing any prior error.
    /// Returns false (and sets the error) when the prompt is missing.
    pub fn begin_generate(&mut self) -> bool {
        if self.prompt.trim().is_empty() {
            self.error = Some("Please provide a prompt".to_string());
            return false;
        }
        if self.generation != GenerationPhase::Idle {
            return false;
        }

        self.error = None;
        self.generation = GenerationPhase::Generating;
        true
    }

    /// Record the outcome of the generation call
    pub fn complete_generate(&mut self, result: Result<String, ClientError>) {
        self.generation = GenerationPhase::Idle;
        match result {
            Ok(photo) => {
                self.photo = Some(photo);
            }
            Err(err) => {
                self.photo = None;
                self.error = Some(err.user_message().to_string());
            }
        }
    }

    /// Publish is available only when name, prompt, and photo are all
    /// present and no publish is in flight
    pub fn can_publish(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.prompt.trim().is_empty()
            && self.photo.is_some()
            && self.publish != PublishPhase::Publishing
    }

    /// Enter the publishing state, clearing prior error and outcome flags.
    /// Returns false (and sets the error) when a required field is missing.
    pub fn begin_publish(&mut self) -> bool {
        if !self.can_publish() {
            self.error = Some("Please generate an image with proper details".to_string());
            return false;
        }

        self.error = None;
        self.publish = PublishPhase::Publishing;
        true
    }

    /// Record the outcome of the publish call
    pub fn complete_publish(&mut self, result: Result<PublishOutcome, ClientError>) {
        match result {
            Ok(outcome) => {
                self.publish = PublishPhase::Published {
                    warning: outcome.warning,
                };
            }
            Err(err) => {
                self.publish = PublishPhase::Idle;
                self.error = Some(err.user_message().to_string());
            }
        }
    }

    /// After a clean publish the client moves on to the gallery; after a
    /// publish-with-warning it stays on the form so the warning is seen
    pub fn should_navigate_to_gallery(&self) -> bool {
        matches!(self.publish, PublishPhase::Published { warning: None })
    }

    /// The warning attached to a degraded publish, if any
    pub fn publish_warning(&self) -> Option<&str> {
        match &self.publish {
            PublishPhase::Published { warning } => warning.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated_form() -> CreateForm {
        let mut form = CreateForm::new();
        form.set_name("Al");
        form.set_prompt("a red balloon");
        assert!(form.begin_generate());
        form.complete_generate(Ok("data:image/jpeg;base64,AQID".to_string()));
        form
    }

    #[test]
    fn test_generate_requires_a_prompt() {
        let mut form = CreateForm::new();
        assert!(!form.can_generate());
        assert!(!form.begin_generate());
        assert_eq!(form.error(), Some("Please provide a prompt"));
    }

    #[test]
    fn test_generate_is_single_flight() {
        let mut form = CreateForm::new();
        form.set_prompt("a red balloon");

        assert!(form.begin_generate());
        assert_eq!(form.generation_phase(), GenerationPhase::Generating);
        // a second press is ignored while the first is in flight
        assert!(!form.can_generate());
        assert!(!form.begin_generate());
    }

    #[test]
    fn test_begin_generate_clears_prior_error() {
        let mut form = CreateForm::new();
        assert!(!form.begin_generate());
        assert!(form.error().is_some());

        form.set_prompt("a red balloon");
        assert!(form.begin_generate());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_successful_generation_stores_the_photo() {
        let form = generated_form();
        assert_eq!(form.photo(), Some("data:image/jpeg;base64,AQID"));
        assert_eq!(form.generation_phase(), GenerationPhase::Idle);
        assert!(form.error().is_none());
    }

    #[test]
    fn test_failed_generation_clears_the_photo_and_sets_a_classified_error() {
        let mut form = generated_form();
        assert!(form.begin_generate());
        form.complete_generate(Err(ClientError::ContentPolicy));

        assert!(form.photo().is_none());
        assert_eq!(
            form.error(),
            Some(ClientError::ContentPolicy.user_message())
        );
        assert_eq!(form.generation_phase(), GenerationPhase::Idle);
    }

    #[test]
    fn test_publish_requires_name_prompt_and_photo() {
        let mut form = CreateForm::new();
        assert!(!form.can_publish());
        assert!(!form.begin_publish());
        assert_eq!(
            form.error(),
            Some("Please generate an image with proper details")
        );

        form.set_name("Al");
        form.set_prompt("a red balloon");
        assert!(!form.can_publish()); // still no photo

        let mut form = generated_form();
        form.set_name("");
        assert!(!form.can_publish()); // photo but no name
    }

    #[test]
    fn test_clean_publish_navigates_to_the_gallery() {
        let mut form = generated_form();
        assert!(form.begin_publish());
        form.complete_publish(Ok(PublishOutcome {
            photo: "https://cdn.example.com/x.jpg".to_string(),
            warning: None,
        }));

        assert!(form.should_navigate_to_gallery());
        assert!(form.publish_warning().is_none());
    }

    #[test]
    fn test_publish_with_warning_stays_on_the_form() {
        let mut form = generated_form();
        assert!(form.begin_publish());
        form.complete_publish(Ok(PublishOutcome {
            photo: "data:image/jpeg;base64,AQID".to_string(),
            warning: Some("stored inline".to_string()),
        }));

        assert!(!form.should_navigate_to_gallery());
        assert_eq!(form.publish_warning(), Some("stored inline"));
    }

    #[test]
    fn test_failed_publish_keeps_the_form_with_an_error() {
        let mut form = generated_form();
        assert!(form.begin_publish());
        form.complete_publish(Err(ClientError::Other("boom".to_string())));

        assert_eq!(form.publish_phase(), &PublishPhase::Idle);
        assert!(form.error().is_some());
        // the generated photo survives a failed publish
        assert!(form.photo().is_some());
    }

    #[test]
    fn test_publish_is_single_flight() {
        let mut form = generated_form();
        assert!(form.begin_publish());
        assert!(!form.can_publish());
        assert!(!form.begin_publish());
    }

    #[test]
    fn test_surprise_me_replaces_the_prompt_locally() {
        let mut form = CreateForm::new();
        form.set_prompt("a red balloon");
        form.surprise_me();

        assert_ne!(form.prompt(), "a red balloon");
        assert!(super::super::prompts::SURPRISE_PROMPTS.contains(&form.prompt()));
    }
}
