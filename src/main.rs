use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use synopsis::application::ports::{LlmClient, SpeechSynthesizer, TranscriptionEngine};
use synopsis::application::services::{
    ModelCatalog, NarrationService, PipelineService, SummarizationService,
};
use synopsis::infrastructure::audio::{MockTranscriptionEngine, TranscriptionEngineFactory};
use synopsis::infrastructure::llm::{
    ChatCompletionClient, GROQ_BASE_URL, MockLlmClient, OPENAI_BASE_URL,
};
use synopsis::infrastructure::observability::{TracingConfig, init_tracing};
use synopsis::infrastructure::speech::{MockSpeechSynthesizer, SpeechSynthesizerFactory};
use synopsis::infrastructure::storage::NarrationStore;
use synopsis::infrastructure::text_processing::CompositeFileLoader;
use synopsis::presentation::config::{GROQ_API_KEY_VAR, LlmProvider};
use synopsis::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

struct Adapters {
    llm_client: Arc<dyn LlmClient>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    transcription: Option<Arc<dyn TranscriptionEngine>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;
    let scaffold_config = ScaffoldConfig::from_env();

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    let tracing_config = TracingConfig {
        environment: environment.to_string(),
        json_format: settings.logging.enable_json || TracingConfig::default().json_format,
        level: settings.logging.level.clone(),
    };
    init_tracing(&tracing_config, addr);

    let adapters = if scaffold_config.enabled {
        tracing::warn!(
            delay_ms = scaffold_config.mock_response_delay_ms,
            "Scaffold mode: external services are mocked"
        );
        scaffold_adapters(&settings, &scaffold_config)
    } else {
        live_adapters(&settings).await?
    };

    if let Some(dir) = &settings.narration.artifact_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create artifact dir {}", dir.display()))?;
    }

    let file_loader = Arc::new(CompositeFileLoader::for_documents(
        &settings.ingestion.join_separator,
    ));

    let summarization_service = Arc::new(SummarizationService::new(
        adapters.llm_client,
        ModelCatalog::new(
            settings.llm.default_model.clone(),
            settings.llm.supported_models.clone(),
        ),
        settings.llm.max_input_chars,
    ));

    let narration_service = Arc::new(NarrationService::new(
        adapters.synthesizer,
        settings.narration.language.clone(),
        settings.narration.artifact_dir.clone(),
    ));

    let pipeline_service = Arc::new(PipelineService::new(
        file_loader,
        summarization_service,
        narration_service,
        adapters.transcription,
    ));

    let narration_store = Arc::new(NarrationStore::new());
    spawn_narration_sweeper(
        Arc::clone(&narration_store),
        Duration::from_secs(settings.narration.artifact_ttl_secs),
    );

    let state = AppState::new(pipeline_service, narration_store, settings);
    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn scaffold_adapters(settings: &Settings, scaffold_config: &ScaffoldConfig) -> Adapters {
    let transcription: Option<Arc<dyn TranscriptionEngine>> = settings
        .transcription
        .enabled
        .then(|| Arc::new(MockTranscriptionEngine) as Arc<dyn TranscriptionEngine>);

    Adapters {
        llm_client: Arc::new(MockLlmClient::with_delay(
            scaffold_config.mock_response_delay(),
        )),
        synthesizer: Arc::new(MockSpeechSynthesizer),
        transcription,
    }
}

async fn live_adapters(settings: &Settings) -> anyhow::Result<Adapters> {
    let api_key = settings.llm_api_key().with_context(|| {
        format!("LLM credential missing: set llm.api_key or {GROQ_API_KEY_VAR}")
    })?;

    let base_url = settings.llm.base_url.clone().unwrap_or_else(|| {
        match settings.llm.provider {
            LlmProvider::Groq => GROQ_BASE_URL,
            LlmProvider::OpenAi => OPENAI_BASE_URL,
        }
        .to_string()
    });
    tracing::info!(
        provider = ?settings.llm.provider,
        base_url = %base_url,
        default_model = %settings.llm.default_model,
        "Using chat completion API"
    );
    let llm_client: Arc<dyn LlmClient> = Arc::new(ChatCompletionClient::new(base_url, api_key.clone()));

    let synthesizer = SpeechSynthesizerFactory::create(&settings.narration)
        .context("Failed to configure speech synthesis")?;

    let transcription = if settings.transcription.enabled {
        let transcription_settings = settings.transcription.clone();
        let engine = tokio::task::spawn_blocking(move || {
            TranscriptionEngineFactory::create(&transcription_settings, Some(&api_key))
        })
        .await
        .context("Transcription engine loader panicked")?
        .context("Failed to load transcription engine")?;
        Some(engine)
    } else {
        tracing::info!("Audio transcription disabled");
        None
    };

    Ok(Adapters {
        llm_client,
        synthesizer,
        transcription,
    })
}

fn spawn_narration_sweeper(store: Arc<NarrationStore>, ttl: Duration) {
    let period = (ttl / 2).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            store.evict_older_than(ttl).await;
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
