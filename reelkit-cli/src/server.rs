use std::path::PathBuf;

use rouille::{Request, Response};

use reelkit::{AssetResolver, Registry, RenderBackend, RenderRequest, RenderResponse};

/// Listening options of the render server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerOpts {
    pub port: u16,
    pub media_dir: PathBuf,
}

impl Default for ServerOpts {
    fn default() -> Self {
        Self {
            port: 3001,
            media_dir: PathBuf::from("/data/media"),
        }
    }
}

/// Everything a request handler reads. Built once at startup.
pub struct ServerState {
    registry: Registry,
    resolver: AssetResolver,
    backend: Box<dyn RenderBackend>,
}

impl ServerState {
    pub fn new(opts: &ServerOpts, backend: Box<dyn RenderBackend>) -> Self {
        Self {
            registry: Registry::builtin(),
            resolver: AssetResolver::for_server(&opts.media_dir, opts.port),
            backend,
        }
    }
}

/// Run the server on `0.0.0.0:<port>`. Never returns.
pub fn serve(opts: &ServerOpts, backend: Box<dyn RenderBackend>) -> ! {
    let addr = format!("0.0.0.0:{}", opts.port);
    let state = ServerState::new(opts, backend);
    tracing::info!(
        port = opts.port,
        media_dir = %opts.media_dir.display(),
        backend = state.backend.name(),
        "render server running"
    );
    rouille::start_server(addr, move |request| handle(request, &state))
}

pub fn handle(request: &Request, state: &ServerState) -> Response {
    if request.method() == "OPTIONS" {
        return with_cors(Response::empty_204())
            .with_additional_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS");
    }

    // /media/<path> is matched by prefix; router! only captures single segments.
    let url = request.url();
    if request.method() == "GET"
        && let Some(rel) = url.strip_prefix("/media/")
    {
        return with_cors(media(rel, state));
    }

    let response = rouille::router!(request,
        (GET) ["/health"] => {
            Response::json(&serde_json::json!({"status": "ok"}))
        },
        (POST) ["/render"] => {
            render(request, state)
        },
        _ => {
            Response::json(&serde_json::json!({"error": "not found"})).with_status_code(404)
        }
    );
    tracing::debug!(
        method = request.method(),
        url = %url,
        status = response.status_code,
        "request"
    );
    with_cors(response)
}

fn render(request: &Request, state: &ServerState) -> Response {
    let req = match rouille::input::json_input::<RenderRequest>(request) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "malformed render request");
            let body = RenderResponse {
                success: false,
                output_path: None,
                error: Some(format!("invalid request body: {e}")),
            };
            return Response::json(&body).with_status_code(400);
        }
    };

    let resp = reelkit::render_request(
        &state.registry,
        &state.resolver,
        state.backend.as_ref(),
        req,
    );
    let status = if resp.success { 200 } else { 500 };
    Response::json(&resp).with_status_code(status)
}

fn media(rel: &str, state: &ServerState) -> Response {
    let path = match state.resolver.media_file(rel) {
        Ok(p) => p,
        Err(e) => {
            return Response::json(&serde_json::json!({"error": e.to_string()}))
                .with_status_code(400);
        }
    };
    match std::fs::File::open(&path) {
        Ok(file) => {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
            Response::from_file(rouille::extension_to_mime(ext), file)
        }
        Err(_) => Response::empty_404(),
    }
}

fn with_cors(response: Response) -> Response {
    response
        .with_additional_header("Access-Control-Allow-Origin", "*")
        .with_additional_header(
            "Access-Control-Allow-Headers",
            "Origin, X-Requested-With, Content-Type, Accept, Range",
        )
        .with_additional_header("Access-Control-Expose-Headers", "Content-Length, Content-Range")
}

#[cfg(test)]
#[path = "../tests/unit/server.rs"]
mod tests;
