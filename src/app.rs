// SPDX-License-Identifier: GPL-3.0-only

use crate::app_settings;
use crate::config::Config;
use crate::crypto::{CipherError, CipherService};
use crate::fl;
use crate::input::{BoundField, FieldRegistry};
use crate::layout::{ControlKey, KeyClass, LayoutId, LayoutTable};
use crate::renderer::{render_keyboard, DragTracker, KeyboardRenderer, RendererMessage};
use crate::state::WidgetState;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::{event, mouse, window, Alignment, Event, Length, Padding, Point, Subscription};
use cosmic::prelude::*;
use cosmic::widget::{self, button, container};
use std::collections::VecDeque;

/// The application model stores app-specific state used to describe its
/// interface and drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: cosmic::Core,
    /// Configuration data that persists between application runs.
    config: Config,
    /// Keyboard panel position that persists between runs.
    widget_state: WidgetState,
    /// Config handle for state persistence.
    state_config: Option<cosmic_config::Config>,
    /// Keyboard widget state: layout, visibility, rendered keys, modifiers.
    keyboard: KeyboardRenderer,
    /// Drag-to-reposition gesture tracking.
    drag: DragTracker,
    /// Keyboard panel position inside the window.
    panel_position: Point,
    /// Last known cursor position (for drag gesture starts).
    cursor_position: Point,
    /// Current window size (for clamping the panel position).
    window_size: (f32, f32),
    /// The per-session keystroke cipher; `None` when the platform crypto
    /// primitives are unavailable, which disables the literal-key path.
    cipher: Option<CipherService>,
    /// The demonstration text fields and the active binding.
    fields: FieldRegistry,
    /// Literal activations waiting for their cipher round trip.
    pending: VecDeque<PendingInsert>,
    /// Whether a cipher round trip is currently in flight.
    round_trip_inflight: bool,
    /// Localized layout selector entries, indexed like `LayoutId::ALL`.
    layout_titles: Vec<String>,
}

/// A literal activation queued for its cipher round trip.
///
/// The target field is captured at activation time so a binding change
/// mid-flight cannot misroute the inserted text.
#[derive(Debug, Clone)]
struct PendingInsert {
    field_id: String,
    text: String,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// A keyboard widget interaction.
    Renderer(RendererMessage),
    /// A text field was clicked or focused; the binding moves to it.
    FieldActivated(String),
    /// A cipher round trip finished for the given field.
    RoundTripFinished(String, Result<String, CipherError>),
    /// Configuration has been updated.
    UpdateConfig(Config),
}

/// Create a COSMIC application from the app model
impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = app_settings::APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        // Load configuration
        let config = cosmic_config::Config::new(Self::APP_ID, Config::VERSION)
            .map(|context| match Config::get_entry(&context) {
                Ok(config) => config,
                Err((_errors, config)) => config,
            })
            .unwrap_or_default();

        // Load the persisted panel position
        let state_config =
            cosmic_config::Config::new_state(Self::APP_ID, WidgetState::VERSION).ok();
        let widget_state = state_config
            .as_ref()
            .map(|context| match WidgetState::get_entry(context) {
                Ok(state) => state,
                Err((_errors, state)) => state,
            })
            .unwrap_or_default();

        // Load the embedded layout table; an empty table leaves the window
        // usable (fields and toggle) with no keys to press.
        let table = match LayoutTable::builtin() {
            Ok(table) => table,
            Err(e) => {
                tracing::error!("failed to load built-in layouts: {e}");
                LayoutTable::empty()
            }
        };

        // The session cipher. Without it, literal keys are disabled while
        // control and modifier keys keep working.
        let cipher = match CipherService::new() {
            Ok(cipher) => Some(cipher),
            Err(e) => {
                tracing::error!("session cipher unavailable, literal keys disabled: {e}");
                None
            }
        };

        let keyboard = KeyboardRenderer::new(table, config.startup_layout(), config.start_visible);

        let fields = FieldRegistry::new(vec![
            BoundField::new("username"),
            BoundField::new("password").masked(),
            BoundField::new("note").multiline(),
        ]);

        let layout_titles = LayoutId::ALL.iter().map(|id| layout_title(*id)).collect();

        let app = AppModel {
            core,
            config,
            panel_position: Point::new(widget_state.x, widget_state.y),
            widget_state,
            state_config,
            keyboard,
            drag: DragTracker::new(),
            cursor_position: Point::ORIGIN,
            window_size: (app_settings::DEFAULT_WIDTH, app_settings::DEFAULT_HEIGHT),
            cipher,
            fields,
            pending: VecDeque::new(),
            round_trip_inflight: false,
            layout_titles,
        };

        (app, Task::none())
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        let toggle_label = if self.keyboard.is_visible() {
            fl!("hide-keyboard")
        } else {
            fl!("show-keyboard")
        };

        let header = widget::row::row()
            .spacing(12.0)
            .align_y(Alignment::Center)
            .push(widget::text::title3(fl!("app-title")))
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(
                button::text(toggle_label)
                    .on_press(Message::Renderer(RendererMessage::ToggleVisibility)),
            );

        let mut fields = widget::column::column().spacing(8.0);
        for field in self.fields.iter() {
            fields = fields.push(self.field_card(field));
        }

        // The keyboard floats inside the remaining space, offset by its
        // dragged position.
        let keyboard_region: Element<'_, Message> = if self.keyboard.is_visible() {
            let panel = render_keyboard(
                &self.keyboard,
                &self.layout_titles,
                app_settings::PANEL_WIDTH,
                app_settings::PANEL_HEIGHT,
                1.0,
            )
            .map(Message::Renderer);

            container(panel)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(Padding {
                    top: self.panel_position.y,
                    right: 0.0,
                    bottom: 0.0,
                    left: self.panel_position.x,
                })
                .into()
        } else {
            widget::Space::new(Length::Fill, Length::Fill).into()
        };

        let content = widget::column::column()
            .spacing(16.0)
            .padding(16.0)
            .push(header)
            .push(fields)
            .push(keyboard_region);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let mut subscriptions = vec![];

        // Watch for configuration changes
        let config_subscription = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));
        subscriptions.push(config_subscription);

        // Cursor moves and releases are routed permanently through this one
        // subscription; the drag flag decides whether they reposition the
        // panel. There is no per-gesture listener to attach or detach.
        let pointer_subscription = event::listen_with(|event, _status, _id| match event {
            Event::Mouse(mouse_event) => match mouse_event {
                mouse::Event::CursorMoved { position } => {
                    Some(Message::Renderer(RendererMessage::PointerMoved(position)))
                }
                mouse::Event::ButtonReleased(mouse::Button::Left) => {
                    Some(Message::Renderer(RendererMessage::DragReleased))
                }
                _ => None,
            },
            _ => None,
        });
        subscriptions.push(pointer_subscription);

        Subscription::batch(subscriptions)
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::Renderer(RendererMessage::KeyPressed(identifier)) => {
                return self.handle_key_activation(&identifier);
            }
            Message::Renderer(RendererMessage::LayoutSelected(index)) => {
                if let Some(id) = LayoutId::ALL.get(index) {
                    tracing::info!(layout = %id, "layout selected");
                    self.keyboard.set_layout(*id);
                }
            }
            Message::Renderer(RendererMessage::ToggleVisibility) => {
                let visible = self.keyboard.toggle_visibility();
                tracing::info!(visible, "keyboard visibility toggled");
            }
            Message::Renderer(RendererMessage::DragStarted) => {
                self.drag.begin(self.cursor_position, self.panel_position);
            }
            Message::Renderer(RendererMessage::PointerMoved(point)) => {
                self.cursor_position = point;
                if let Some(position) = self.drag.update(point) {
                    self.panel_position = clamp_position(position, self.window_size);
                }
            }
            Message::Renderer(RendererMessage::DragReleased) => {
                if self.drag.is_dragging() {
                    self.drag.end();
                    self.widget_state.x = self.panel_position.x;
                    self.widget_state.y = self.panel_position.y;
                    self.save_state();
                }
            }
            Message::Renderer(RendererMessage::Noop) => {}
            Message::FieldActivated(id) => {
                if self.fields.bind(&id) {
                    tracing::debug!(field = %id, "input binding moved");
                }
            }
            Message::RoundTripFinished(field_id, result) => {
                self.round_trip_inflight = false;
                match result {
                    Ok(text) => self.commit_insertion(&field_id, &text),
                    Err(e) => {
                        // The activation is dropped; no state changes.
                        tracing::warn!("keystroke dropped: {e}");
                    }
                }
                return self.drain_pending();
            }
            Message::UpdateConfig(config) => {
                if self.config != config {
                    tracing::info!(default_layout = %config.default_layout, "configuration updated");
                }
                self.config = config;
            }
        }

        Task::none()
    }

    /// Called when a window is resized.
    fn on_window_resize(&mut self, _id: window::Id, width: f32, height: f32) {
        self.window_size = (width, height);
        self.panel_position = clamp_position(self.panel_position, self.window_size);
    }
}

impl AppModel {
    /// Dispatches a key activation on its semantic classification.
    fn handle_key_activation(&mut self, identifier: &str) -> Task<cosmic::Action<Message>> {
        let Some(key) = self.keyboard.key(identifier).cloned() else {
            tracing::warn!(identifier, "activation for unknown key ignored");
            return Task::none();
        };
        let Some(class) = self.keyboard.resolve(&key) else {
            tracing::warn!(identifier, "key has no resolvable value, activation ignored");
            return Task::none();
        };

        match class {
            KeyClass::Modifier(modifier) => {
                let active = self.keyboard.toggle_modifier(modifier);
                tracing::debug!(?modifier, active, "modifier toggled");
                Task::none()
            }
            KeyClass::Control(control) => {
                self.apply_control(control);
                Task::none()
            }
            KeyClass::Literal(glyph) => {
                // Silent no-op when no field is bound.
                let Some(field_id) = self.fields.active_id().map(str::to_owned) else {
                    return Task::none();
                };
                if self.cipher.is_none() {
                    tracing::error!("crypto unavailable; literal key dropped");
                    return Task::none();
                }

                self.pending.push_back(PendingInsert {
                    field_id,
                    text: glyph.to_string(),
                });
                self.drain_pending()
            }
        }
    }

    /// Applies a control key to the bound field. Control keys bypass the
    /// cipher round trip; without a binding they are silent no-ops.
    fn apply_control(&mut self, control: ControlKey) {
        let Some(field) = self.fields.active_mut() else {
            return;
        };

        match control {
            ControlKey::Backspace => {
                field.backspace();
            }
            ControlKey::Space => field.insert(" "),
            ControlKey::Tab => field.insert("\t"),
            ControlKey::Enter => {
                // Enter only acts on multi-line fields.
                if field.is_multiline() {
                    field.insert("\n");
                }
            }
        }
    }

    /// Starts the next queued cipher round trip, if none is in flight.
    ///
    /// Activations are serialized: one round trip at a time, completions
    /// drain the queue in order.
    fn drain_pending(&mut self) -> Task<cosmic::Action<Message>> {
        if self.round_trip_inflight {
            return Task::none();
        }
        let Some(insert) = self.pending.pop_front() else {
            return Task::none();
        };
        let Some(cipher) = self.cipher.clone() else {
            return Task::none();
        };

        self.round_trip_inflight = true;
        Task::perform(
            async move {
                let result = cipher.round_trip(insert.text).await;
                (insert.field_id, result)
            },
            |(field_id, result)| {
                cosmic::Action::App(Message::RoundTripFinished(field_id, result))
            },
        )
    }

    /// Completes a literal activation: splices the decoded text into its
    /// target field, advances the caret, and releases a pending one-shot
    /// shift. All-or-nothing: a missing field leaves every flag untouched.
    fn commit_insertion(&mut self, field_id: &str, text: &str) {
        let Some(field) = self.fields.get_mut(field_id) else {
            tracing::warn!(field = %field_id, "insertion target vanished, keystroke dropped");
            return;
        };

        field.insert(text);
        tracing::debug!(
            field = %field_id,
            revision = field.revision(),
            caret = field.caret(),
            "keystroke inserted"
        );

        if self.keyboard.clear_oneshot() {
            tracing::debug!("one-shot shift released");
        }
    }

    /// Renders one demonstration field as an activatable card.
    fn field_card<'a>(&'a self, field: &'a BoundField) -> Element<'a, Message> {
        let label = match field.id() {
            "username" => fl!("field-username"),
            "password" => fl!("field-password"),
            "note" => fl!("field-note"),
            other => other.to_string(),
        };

        let shown = if field.value().is_empty() {
            fl!("field-empty")
        } else if field.is_masked() {
            "\u{2022}".repeat(field.len_chars())
        } else {
            field.value().to_string()
        };

        let card_class = if self.fields.is_active(field.id()) {
            cosmic::style::Button::Suggested
        } else {
            cosmic::style::Button::Standard
        };

        button::custom(
            widget::column::column()
                .spacing(4.0)
                .push(widget::text::caption(label))
                .push(widget::text::body(shown)),
        )
        .class(card_class)
        .width(Length::Fill)
        .on_press(Message::FieldActivated(field.id().to_string()))
        .into()
    }

    /// Save the panel position to cosmic_config for persistence.
    fn save_state(&self) {
        if let Some(ref state_config) = self.state_config {
            if let Err(err) = self.widget_state.write_entry(state_config) {
                tracing::error!("failed to save widget state: {:?}", err);
            } else {
                tracing::debug!(
                    "widget state saved: {}x{}",
                    self.widget_state.x,
                    self.widget_state.y
                );
            }
        }
    }
}

/// Localized selector title for a layout.
fn layout_title(id: LayoutId) -> String {
    match id {
        LayoutId::En => fl!("layout-en"),
        LayoutId::EnScrambled => fl!("layout-en-scrambled"),
        LayoutId::Th => fl!("layout-th"),
        LayoutId::ThScrambled => fl!("layout-th-scrambled"),
        LayoutId::Numpad => fl!("layout-numpad"),
        LayoutId::NumpadScrambled => fl!("layout-numpad-scrambled"),
    }
}

/// Clamps the panel position so the panel stays inside the window.
fn clamp_position(position: Point, window_size: (f32, f32)) -> Point {
    let max_x = (window_size.0 - app_settings::PANEL_WIDTH).max(0.0);
    let max_y = (window_size.1 - app_settings::PANEL_HEIGHT).max(0.0);
    Point::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: the panel position clamps into the window
    #[test]
    fn test_clamp_position() {
        let window = (
            app_settings::PANEL_WIDTH + 100.0,
            app_settings::PANEL_HEIGHT + 50.0,
        );

        assert_eq!(
            clamp_position(Point::new(-20.0, -5.0), window),
            Point::new(0.0, 0.0)
        );
        assert_eq!(
            clamp_position(Point::new(40.0, 30.0), window),
            Point::new(40.0, 30.0)
        );
        assert_eq!(
            clamp_position(Point::new(5000.0, 5000.0), window),
            Point::new(100.0, 50.0)
        );
    }

    /// Test: windows smaller than the panel pin it to the origin
    #[test]
    fn test_clamp_position_small_window() {
        assert_eq!(
            clamp_position(Point::new(50.0, 50.0), (100.0, 100.0)),
            Point::new(0.0, 0.0)
        );
    }

    /// Test: message variants exist and can be created
    #[test]
    fn test_message_variants() {
        let renderer_msg = Message::Renderer(RendererMessage::ToggleVisibility);
        assert!(matches!(
            renderer_msg,
            Message::Renderer(RendererMessage::ToggleVisibility)
        ));

        let field_msg = Message::FieldActivated("username".to_string());
        assert!(matches!(field_msg, Message::FieldActivated(_)));

        let finished = Message::RoundTripFinished(
            "username".to_string(),
            Err(CipherError::DecryptionFailed),
        );
        assert!(matches!(finished, Message::RoundTripFinished(_, Err(_))));

        let config_msg = Message::UpdateConfig(Config::default());
        assert!(matches!(config_msg, Message::UpdateConfig(_)));
    }
}
