use synopsis::infrastructure::speech::{SpeechSynthesizerFactory, SpeechSynthesizerFactoryError};
use synopsis::presentation::config::{NarrationProvider, NarrationSettings};

#[test]
fn given_openai_provider_without_key_when_creating_then_returns_missing_api_key() {
    let settings = NarrationSettings {
        provider: NarrationProvider::OpenAi,
        api_key: None,
        ..NarrationSettings::default()
    };

    let result = SpeechSynthesizerFactory::create(&settings);

    let Err(error) = result else {
        panic!("expected a configuration error");
    };
    assert!(matches!(error, SpeechSynthesizerFactoryError::MissingApiKey));
    assert!(error.to_string().contains("narration.api_key"));
}

#[test]
fn given_openai_provider_with_key_when_creating_then_returns_ok() {
    let settings = NarrationSettings {
        provider: NarrationProvider::OpenAi,
        api_key: Some("sk-test".to_string()),
        ..NarrationSettings::default()
    };

    assert!(SpeechSynthesizerFactory::create(&settings).is_ok());
}

#[test]
fn given_default_settings_when_creating_then_google_needs_no_credentials() {
    assert!(SpeechSynthesizerFactory::create(&NarrationSettings::default()).is_ok());
}
