use std::sync::{Arc, Mutex};

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::AppState;
use crate::engine::core::lifecycle::BackgroundAnimation;
use crate::engine::director::scroll::ScrollState;
use crate::engine::director::theme::Theme;
use crate::engine::input::events::{
    ActiveChanged, DisposeRequested, PanelCloseRequested, PanelOpened, ScrollChanged, ThemeChanged,
};
use crate::engine::interaction::panel::PanelId;
use crate::engine::particles::particle_set::ParticleSet;
use crate::engine::particles::scatter::TextScatter;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Notifications queued since the last send.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    /// Responses queued since the last send.
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }

    /// Queue response for transmission to the host.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Thread-safe queue of raw messages. The wasm listener fills it; native
/// builds and tests can push into it directly.
#[derive(Resource, Clone, Default)]
pub struct MessageQueue(Arc<Mutex<Vec<String>>>);

impl MessageQueue {
    pub fn push(&self, message: impl Into<String>) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(message.into());
        }
    }

    fn drain(&self) -> Vec<String> {
        self.0
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

/// Plugin establishing the JSON-RPC bridge for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<MessageQueue>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_panel_opened,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(message_queue: Res<MessageQueue>) {
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap pre-filter before queuing; parsing happens in the frame.
            if message_str.contains("jsonrpc") {
                queue_clone.push(message_str);
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
}

/// Event representing an incoming RPC message from the host.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Res<MessageQueue>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    for message_str in message_queue.drain() {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// A host request after parameter validation.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    SetScroll {
        offset_px: f32,
        viewport_height_px: f32,
    },
    SetTheme(Theme),
    ClosePanel(Option<PanelId>),
    SetActive(bool),
    Dispose,
    GetState,
}

impl HostCommand {
    /// Map a request onto a command, rejecting unknown methods and bad
    /// parameters with the standard error codes.
    pub fn parse(request: &RpcRequest) -> Result<Self, RpcError> {
        if request.jsonrpc != "2.0" {
            return Err(RpcError::invalid_request("Expected jsonrpc '2.0'"));
        }
        match request.method.as_str() {
            "set_scroll" => {
                #[derive(Deserialize)]
                struct ScrollParams {
                    offset_px: f32,
                    viewport_height_px: f32,
                }

                let params = serde_json::from_value::<ScrollParams>(request.params.clone())
                    .map_err(|_| {
                        RpcError::invalid_params("Expected 'offset_px' and 'viewport_height_px'")
                    })?;
                Ok(Self::SetScroll {
                    offset_px: params.offset_px,
                    viewport_height_px: params.viewport_height_px,
                })
            }
            "set_theme" => {
                #[derive(Deserialize)]
                struct ThemeParams {
                    theme: String,
                }

                let params = serde_json::from_value::<ThemeParams>(request.params.clone())
                    .map_err(|_| RpcError::invalid_params("Expected 'theme' parameter"))?;
                let theme = params
                    .theme
                    .parse::<Theme>()
                    .map_err(|error| RpcError::invalid_params(&error.to_string()))?;
                Ok(Self::SetTheme(theme))
            }
            "close_panel" => {
                // Missing params or a null panel close whatever is open.
                let panel = match request.params.get("panel") {
                    None | Some(serde_json::Value::Null) => None,
                    Some(serde_json::Value::String(id)) => Some(
                        id.parse::<PanelId>()
                            .map_err(|error| RpcError::invalid_params(&error.to_string()))?,
                    ),
                    Some(_) => {
                        return Err(RpcError::invalid_params(
                            "Expected string 'panel' parameter",
                        ));
                    }
                };
                Ok(Self::ClosePanel(panel))
            }
            "set_active" => {
                #[derive(Deserialize)]
                struct ActiveParams {
                    active: bool,
                }

                let params = serde_json::from_value::<ActiveParams>(request.params.clone())
                    .map_err(|_| RpcError::invalid_params("Expected boolean 'active' parameter"))?;
                Ok(Self::SetActive(params.active))
            }
            "dispose" => Ok(Self::Dispose),
            "get_state" => Ok(Self::GetState),
            other => Err(RpcError::method_not_found(other)),
        }
    }
}

/// Event writers for every host signal the bridge can produce.
#[derive(SystemParam)]
struct HostSignals<'w> {
    scroll: EventWriter<'w, ScrollChanged>,
    theme: EventWriter<'w, ThemeChanged>,
    close: EventWriter<'w, PanelCloseRequested>,
    active: EventWriter<'w, ActiveChanged>,
    dispose: EventWriter<'w, DisposeRequested>,
}

/// Read-only view of the background for `get_state`.
#[derive(SystemParam)]
struct BackgroundSnapshot<'w> {
    app_state: Res<'w, State<AppState>>,
    animation: Res<'w, BackgroundAnimation>,
    scroll: Res<'w, ScrollState>,
    theme: Res<'w, Theme>,
    scatter: Res<'w, TextScatter>,
    particles: Option<Res<'w, ParticleSet>>,
}

impl BackgroundSnapshot<'_> {
    fn to_json(&self) -> serde_json::Value {
        let phase = self.scroll.phase();
        serde_json::json!({
            "state": format!("{:?}", self.app_state.get()),
            "active": self.animation.is_running(),
            "scroll_progress": self.scroll.progress(),
            "content_opacity": phase.content_opacity(),
            "dissolve": phase.dissolve,
            "reassemble": phase.reassemble,
            "theme": self.theme.as_str(),
            "scatter_active": self.scatter.is_active(),
            "particles": self.particles.as_ref().map_or(0, |set| set.len()),
        })
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut signals: HostSignals,
    snapshot: BackgroundSnapshot,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Ignoring malformed RPC message: {}", parse_error);
                continue;
            }
        };

        let outcome = HostCommand::parse(&request)
            .map(|command| apply_command(command, &mut signals, &snapshot));

        // Notifications carry no id and get no response, but still act.
        match (request.id, outcome) {
            (Some(id), Ok(result)) => rpc_interface.queue_response(RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: Some(result),
                error: None,
                id: Some(id),
            }),
            (Some(id), Err(error)) => {
                warn!("Rejected RPC '{}': {}", request.method, error.message);
                rpc_interface.queue_response(create_error_response(id, error));
            }
            (None, Err(error)) => {
                warn!("Rejected RPC '{}': {}", request.method, error.message);
            }
            (None, Ok(_)) => {}
        }
    }
}

fn apply_command(
    command: HostCommand,
    signals: &mut HostSignals,
    snapshot: &BackgroundSnapshot,
) -> serde_json::Value {
    match command {
        HostCommand::SetScroll {
            offset_px,
            viewport_height_px,
        } => {
            signals.scroll.write(ScrollChanged {
                offset_px,
                viewport_height_px,
            });
        }
        HostCommand::SetTheme(theme) => {
            signals.theme.write(ThemeChanged(theme));
        }
        HostCommand::ClosePanel(panel) => {
            signals.close.write(PanelCloseRequested(panel));
        }
        HostCommand::SetActive(active) => {
            signals.active.write(ActiveChanged(active));
        }
        HostCommand::Dispose => {
            signals.dispose.write(DisposeRequested);
        }
        HostCommand::GetState => return snapshot.to_json(),
    }
    serde_json::json!({ "success": true })
}

/// Forward finished scatters to the host as `open_panel`.
fn notify_panel_opened(
    mut events: EventReader<PanelOpened>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for PanelOpened(panel) in events.read() {
        rpc_interface.send_notification("open_panel", serde_json::json!({ "panel": panel }));
    }
}

/// Create standardized error response.
fn create_error_response(id: serde_json::Value, error: RpcError) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(error),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No transport outside the browser.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(serde_json::json!(1)),
        }
    }

    #[test]
    fn parses_host_commands() {
        assert_eq!(
            HostCommand::parse(&request(
                "set_scroll",
                serde_json::json!({ "offset_px": 1200.0, "viewport_height_px": 800.0 })
            )),
            Ok(HostCommand::SetScroll {
                offset_px: 1200.0,
                viewport_height_px: 800.0
            })
        );
        assert_eq!(
            HostCommand::parse(&request("set_theme", serde_json::json!({ "theme": "dark" }))),
            Ok(HostCommand::SetTheme(Theme::Dark))
        );
        assert_eq!(
            HostCommand::parse(&request(
                "close_panel",
                serde_json::json!({ "panel": "services-window" })
            )),
            Ok(HostCommand::ClosePanel(Some(PanelId::Services)))
        );
        assert_eq!(
            HostCommand::parse(&request("close_panel", serde_json::Value::Null)),
            Ok(HostCommand::ClosePanel(None))
        );
        assert_eq!(
            HostCommand::parse(&request("set_active", serde_json::json!({ "active": false }))),
            Ok(HostCommand::SetActive(false))
        );
        assert_eq!(
            HostCommand::parse(&request("dispose", serde_json::Value::Null)),
            Ok(HostCommand::Dispose)
        );
    }

    #[test]
    fn rejects_bad_requests_with_standard_codes() {
        let unknown = HostCommand::parse(&request("spin", serde_json::Value::Null)).unwrap_err();
        assert_eq!(unknown.code, -32601);

        let theme = HostCommand::parse(&request("set_theme", serde_json::json!({ "theme": "sepia" })))
            .unwrap_err();
        assert_eq!(theme.code, -32602);
        assert!(theme.message.contains("sepia"));

        let panel = HostCommand::parse(&request("close_panel", serde_json::json!({ "panel": "blog" })))
            .unwrap_err();
        assert_eq!(panel.code, -32602);

        let numeric = HostCommand::parse(&request("close_panel", serde_json::json!({ "panel": 5 })))
            .unwrap_err();
        assert_eq!(numeric.code, -32602);
        assert_eq!(
            HostCommand::parse(&request("close_panel", serde_json::json!({ "panel": null }))),
            Ok(HostCommand::ClosePanel(None))
        );

        let scroll = HostCommand::parse(&request("set_scroll", serde_json::json!({ "offset_px": 3 })))
            .unwrap_err();
        assert_eq!(scroll.code, -32602);
    }

    #[test]
    fn wrong_protocol_version_is_invalid_request() {
        let mut legacy = request("dispose", serde_json::Value::Null);
        legacy.jsonrpc = "1.0".to_string();
        assert_eq!(HostCommand::parse(&legacy).unwrap_err().code, -32600);
    }

    #[test]
    fn params_are_optional_on_the_wire() {
        let parsed: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"dispose"}"#).unwrap();
        assert!(parsed.id.is_none());
        assert_eq!(HostCommand::parse(&parsed), Ok(HostCommand::Dispose));
    }

    #[test]
    fn queue_drains_in_order() {
        let queue = MessageQueue::default();
        queue.push("a");
        queue.push(String::from("b"));
        assert_eq!(queue.drain(), vec!["a".to_string(), "b".to_string()]);
        assert!(queue.drain().is_empty());
    }
}
