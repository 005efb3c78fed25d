use actix_cors::Cors;
use actix_web::{
    http::{
        header::{
            HeaderName,
            AUTHORIZATION,
            CONTENT_TYPE,
        },
        Method,
    },
    middleware,
    web,
    App,
    HttpRequest,
    HttpResponse,
    HttpServer,
};
use log::{
    error,
    info,
};
use std::{
    net::Ipv4Addr,
    sync::Arc,
};
use uuid::Uuid;

use crate::api::{
    check_version,
    health_check,
    list_languages,
};
use crate::classifier::classify;
use crate::config::{
    AppConfig,
    PersistMode,
};
use crate::errors::SystemError;
use crate::executor::SimpleExecutor;
use crate::store::{
    ExecutionStore,
    LogStore,
    SupabaseStore,
};
use crate::types::{
    ExecutionRecord,
    ExecutionRequest,
    ExecutionResult,
};

pub struct AppState {
    pub executor: SimpleExecutor,
    pub store: Arc<dyn ExecutionStore>,
    pub persist_mode: PersistMode,
}

async fn persist(state: &AppState, record: ExecutionRecord) -> Result<(), SystemError> {
    match state.persist_mode {
        PersistMode::Await => {
            state.store.append(&record).await?;
        }
        PersistMode::Background => {
            let store = Arc::clone(&state.store);
            tokio::spawn(async move {
                if let Err(e) = store.append(&record).await {
                    error!("Failed to store execution record: {}", e);
                }
            });
        }
    }
    Ok(())
}

async fn execute_code(
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, SystemError> {
    let request: ExecutionRequest = serde_json::from_slice(&body)?;
    let run_id = Uuid::new_v4();
    info!(
        "[{}] Received {} code ({} bytes) for session {:?}",
        run_id,
        request.language,
        request.code.len(),
        request.session_id
    );

    let executor = state.executor;
    let job = request.clone();
    let outcome = web::block(move || executor.execute(&job))
        .await
        .map_err(|e| SystemError::Blocking(e.to_string()))?;

    persist(&state, ExecutionRecord::new(&request, &outcome)).await?;

    let result = ExecutionResult::from_outcome(&outcome);
    info!("[{}] Finished: {:?}", run_id, classify(&result.output, false));
    Ok(HttpResponse::Ok().json(result))
}

async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, SystemError> {
    if req.method() == Method::OPTIONS {
        Ok(HttpResponse::Ok().finish())
    } else if req.method() == Method::POST {
        execute_code(body, state).await
    } else {
        Ok(HttpResponse::MethodNotAllowed().finish())
    }
}

fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
        .max_age(3600)
}

/// Every path accepts the execution POST; a few GET routes serve the shell.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(check_version))
        .route("/languages", web::get().to(list_languages))
        .default_service(web::to(dispatch));
}

fn build_store(config: &AppConfig) -> std::io::Result<Arc<dyn ExecutionStore>> {
    match &config.supabase {
        Some(supabase) => {
            info!("Persisting executions to {}/{}", supabase.url, supabase.table);
            let store = SupabaseStore::new(supabase)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
            Ok(Arc::new(store))
        }
        None => {
            info!("No database configured, execution records go to the log");
            Ok(Arc::new(LogStore))
        }
    }
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let server_address = (Ipv4Addr::UNSPECIFIED, config.port);
    let state = web::Data::new(AppState {
        executor: SimpleExecutor::new(config.script_limits),
        store: build_store(&config)?,
        persist_mode: config.persist_mode,
    });

    info!(
        "Listening on {}:{} (persist mode {:?})",
        server_address.0, server_address.1, config.persist_mode
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(server_address)?
    .run()
    .await
}
