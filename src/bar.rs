//! Status-bar composition.
//!
//! The bar is an ordered sequence of widget descriptors; order is the
//! only relationship between them — left-to-right position on screen,
//! nothing else.  hyprrc does not render: an external bar process reads
//! the sequence, measures each widget's current text, and asks
//! [`Bar::compose`] for the packed boxes.
//!
//! Two behaviors matter beyond the literal style values:
//!
//! * **Packing** — every widget is fixed-width by content except the one
//!   flexible widget (the window title), which absorbs whatever width is
//!   left over.
//! * **Slot stability** — a widget whose data source is unavailable
//!   degrades to a placeholder instead of vacating its slot, so the
//!   widgets after it do not jump around.

use crate::style::{Color, Decoration, Style, StyleOverride};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;

/// How the `GroupBox` widget marks the current group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMethod {
    #[default]
    Line,
    Block,
    Text,
}

/// Unit the `Memory` widget reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryUnit {
    #[default]
    M,
    G,
}

/// Foreground/background pair the `Chord` widget shows per chord mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordColors {
    pub foreground: Color,
    pub background: Color,
}

/// When a widget's content is refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Poll the data source on a timer.
    Interval(Duration),
    /// Redraw only when a daemon event arrives (focus change, group
    /// switch, chord enter/leave, …).
    OnEvent,
}

/// The widget vocabulary, with each kind's own parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetKind {
    /// A thin vertical separator line.
    Separator {
        #[serde(default = "default_line_width")]
        line_width: u32,
    },
    /// Icon for the currently active layout.
    CurrentLayout {
        #[serde(default = "default_layout_scale")]
        scale: f64,
    },
    /// One box per group, current group highlighted.
    GroupBox {
        #[serde(default = "default_gb_active")]
        active: Color,
        #[serde(default = "default_gb_inactive")]
        inactive: Color,
        #[serde(default)]
        highlight_method: HighlightMethod,
        #[serde(default = "default_gb_this_current")]
        this_current_screen_border: Color,
        #[serde(default = "default_gb_this")]
        this_screen_border: Color,
        #[serde(default = "default_gb_other_current")]
        other_current_screen_border: Color,
        #[serde(default = "default_gb_other")]
        other_screen_border: Color,
        #[serde(default = "default_gb_border_width")]
        border_width: u32,
        #[serde(default = "yes")]
        disable_drag: bool,
        #[serde(default)]
        rounded: bool,
    },
    /// Inline command prompt (opened by the `prompt_spawn` action).
    Prompt,
    /// Title of the focused window.  The bar's one flexible widget.
    WindowTitle,
    /// Network throughput for one interface.
    Net {
        #[serde(default)]
        interface: Option<String>,
        #[serde(default = "default_net_format")]
        format: String,
    },
    /// CPU load.
    Cpu {
        #[serde(default = "default_cpu_format")]
        format: String,
    },
    /// Memory usage.
    Memory {
        #[serde(default)]
        measure: MemoryUnit,
    },
    /// Free disk space on the root filesystem.
    DiskFree {
        #[serde(default)]
        visible_on_warn: bool,
    },
    /// Wall clock.
    Clock {
        #[serde(default = "default_clock_format")]
        format: String,
    },
    /// System tray.
    Tray {
        #[serde(default = "default_icon_size")]
        icon_size: u32,
    },
    /// Weather report for a fixed location.
    Weather {
        location: String,
        #[serde(default = "default_weather_format")]
        format: String,
        #[serde(default = "yes")]
        metric: bool,
    },
    /// Name of the active chord mode, if any.
    Chord {
        #[serde(default)]
        chord_colors: BTreeMap<String, ChordColors>,
        #[serde(default)]
        uppercase_names: bool,
    },
    /// Battery charge state.
    Battery {
        #[serde(default = "default_battery_name")]
        battery: String,
        #[serde(default = "default_battery_format")]
        format: String,
        #[serde(default = "default_charge_char")]
        charge_char: char,
        #[serde(default = "default_discharge_char")]
        discharge_char: char,
        #[serde(default = "default_full_char")]
        full_char: char,
        #[serde(default)]
        low_background: Option<Color>,
        #[serde(default = "default_notify_below")]
        notify_below: u8,
    },
    /// Click-to-confirm session exit button.
    QuickExit {
        #[serde(default = "default_exit_text")]
        default_text: String,
    },
}

fn yes() -> bool {
    true
}

fn default_line_width() -> u32 {
    1
}

fn default_layout_scale() -> f64 {
    0.7
}

fn default_gb_active() -> Color {
    "#4c566a".parse().expect("literal color")
}

fn default_gb_inactive() -> Color {
    "#8994a9".parse().expect("literal color")
}

fn default_gb_this_current() -> Color {
    "#c68b7b".parse().expect("literal color")
}

fn default_gb_this() -> Color {
    "#ff4d4d".parse().expect("literal color")
}

fn default_gb_other_current() -> Color {
    "#e4c890".parse().expect("literal color")
}

fn default_gb_other() -> Color {
    "#a789a6".parse().expect("literal color")
}

fn default_gb_border_width() -> u32 {
    3
}

fn default_net_format() -> String {
    "{down} \u{2193}\u{2191} {up}".to_string()
}

fn default_cpu_format() -> String {
    "{load_percent}%".to_string()
}

fn default_clock_format() -> String {
    "%H:%M".to_string()
}

fn default_icon_size() -> u32 {
    20
}

fn default_weather_format() -> String {
    "{location}: {temp}\u{b0}".to_string()
}

fn default_battery_name() -> String {
    "BAT0".to_string()
}

fn default_battery_format() -> String {
    "{char} {percent}%".to_string()
}

fn default_charge_char() -> char {
    '^'
}

fn default_discharge_char() -> char {
    'v'
}

fn default_full_char() -> char {
    '%'
}

fn default_notify_below() -> u8 {
    10
}

fn default_exit_text() -> String {
    "[ shutdown ]".to_string()
}

impl WidgetKind {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Separator { .. } => "separator",
            WidgetKind::CurrentLayout { .. } => "current_layout",
            WidgetKind::GroupBox { .. } => "group_box",
            WidgetKind::Prompt => "prompt",
            WidgetKind::WindowTitle => "window_title",
            WidgetKind::Net { .. } => "net",
            WidgetKind::Cpu { .. } => "cpu",
            WidgetKind::Memory { .. } => "memory",
            WidgetKind::DiskFree { .. } => "disk_free",
            WidgetKind::Clock { .. } => "clock",
            WidgetKind::Tray { .. } => "tray",
            WidgetKind::Weather { .. } => "weather",
            WidgetKind::Chord { .. } => "chord",
            WidgetKind::Battery { .. } => "battery",
            WidgetKind::QuickExit { .. } => "quick_exit",
        }
    }

    /// Whether this widget absorbs leftover bar width.
    pub fn is_flexible(&self) -> bool {
        matches!(self, WidgetKind::WindowTitle)
    }

    /// Default refresh cadence for this kind.  Data-source widgets poll;
    /// everything else waits for daemon events.
    pub fn default_refresh(&self) -> Refresh {
        match self {
            WidgetKind::Net { .. } | WidgetKind::Cpu { .. } | WidgetKind::Memory { .. } => {
                Refresh::Interval(Duration::from_secs(1))
            }
            WidgetKind::Clock { .. } => Refresh::Interval(Duration::from_secs(1)),
            WidgetKind::DiskFree { .. } | WidgetKind::Battery { .. } => {
                Refresh::Interval(Duration::from_secs(60))
            }
            WidgetKind::Weather { .. } => Refresh::Interval(Duration::from_secs(600)),
            _ => Refresh::OnEvent,
        }
    }

    /// Text shown when the widget's data source is unavailable.
    ///
    /// Never empty for data-source widgets: the degraded widget keeps
    /// occupying its slot so later widgets do not shift.
    pub fn placeholder(&self) -> &'static str {
        match self {
            WidgetKind::Net { .. }
            | WidgetKind::Cpu { .. }
            | WidgetKind::Memory { .. }
            | WidgetKind::DiskFree { .. }
            | WidgetKind::Weather { .. }
            | WidgetKind::Battery { .. } => "n/a",
            WidgetKind::Clock { .. } => "--:--",
            _ => "",
        }
    }
}

/// One widget in the bar: kind, partial style, optional decoration, and
/// an optional poll-interval override (seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(flatten)]
    pub kind: WidgetKind,
    #[serde(flatten)]
    pub style: StyleOverride,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoration: Option<Decoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
}

impl Widget {
    /// Refresh cadence, honoring the per-widget interval override.
    pub fn refresh(&self) -> Refresh {
        match self.interval {
            Some(secs) => Refresh::Interval(Duration::from_secs_f64(secs)),
            None => self.kind.default_refresh(),
        }
    }

    /// Text to render: the widget's current content, or its degraded
    /// placeholder when the data source is unavailable.
    pub fn display_text<'a>(&self, content: Option<&'a str>) -> Cow<'a, str> {
        match content {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Borrowed(self.kind.placeholder()),
        }
    }
}

/// Errors from assembling or composing the bar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BarError {
    /// More than one flexible widget declared; the packing would be
    /// ambiguous.
    #[error("bar declares {count} flexible widgets, at most one is allowed")]
    MultipleFlexibleWidgets { count: usize },
    /// `compose` was called with the wrong number of measurements.
    #[error("expected {expected} widget measurements, got {got}")]
    MeasureMismatch { expected: usize, got: usize },
}

/// A positioned widget slot produced by [`Bar::compose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetBox {
    /// Index into the bar's widget sequence.
    pub index: usize,
    /// Left edge, pixels from the bar's left edge.
    pub x: u32,
    /// Slot width in pixels.
    pub width: u32,
}

/// The assembled bar: geometry, style defaults, and the widget sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub height: u32,
    /// Outer margin, `[top, right, bottom, left]`.
    pub margin: [u32; 4],
    /// Bar-wide style defaults each widget's override resolves against.
    pub defaults: Style,
    widgets: Vec<Widget>,
}

impl Bar {
    /// Validate and assemble the bar.
    pub fn new(
        height: u32,
        margin: [u32; 4],
        defaults: Style,
        widgets: Vec<Widget>,
    ) -> Result<Self, BarError> {
        let count = widgets.iter().filter(|w| w.kind.is_flexible()).count();
        if count > 1 {
            return Err(BarError::MultipleFlexibleWidgets { count });
        }
        Ok(Self {
            height,
            margin,
            defaults,
            widgets,
        })
    }

    /// The widget sequence, left to right.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Fully resolved style for the widget at `index`.
    pub fn style_of(&self, index: usize) -> Option<Style> {
        self.widgets
            .get(index)
            .map(|w| w.style.resolve(&self.defaults))
    }

    /// Left-to-right packing of the widget sequence.
    ///
    /// `measured[i]` is the content width of widget `i` as measured by
    /// the renderer; the entry for the flexible widget is ignored.  The
    /// flexible widget receives `max(0, width - sum(fixed))`; everything
    /// else keeps its measured width.
    pub fn compose(&self, width: u32, measured: &[u32]) -> Result<Vec<WidgetBox>, BarError> {
        if measured.len() != self.widgets.len() {
            return Err(BarError::MeasureMismatch {
                expected: self.widgets.len(),
                got: measured.len(),
            });
        }

        let fixed_total: u32 = self
            .widgets
            .iter()
            .zip(measured)
            .filter(|(w, _)| !w.kind.is_flexible())
            .map(|(_, m)| *m)
            .sum();
        let flex_width = width.saturating_sub(fixed_total);

        let mut boxes = Vec::with_capacity(self.widgets.len());
        let mut x = 0u32;
        for (index, (widget, &m)) in self.widgets.iter().zip(measured).enumerate() {
            let w = if widget.kind.is_flexible() { flex_width } else { m };
            boxes.push(WidgetBox { index, x, width: w });
            x = x.saturating_add(w);
        }
        Ok(boxes)
    }

    /// Edge colors for the power-line arrow after the widget at `index`,
    /// if that widget carries the decoration: the trailing color is the
    /// widget's own background, the leading color the next widget's
    /// background (or the bar default past the last widget).
    pub fn powerline_edges(&self, index: usize) -> Option<(Color, Color)> {
        let widget = self.widgets.get(index)?;
        match widget.decoration {
            Some(Decoration::PowerlineArrow) => {}
            None => return None,
        }
        let trailing = widget.style.resolve(&self.defaults).background;
        let leading = self
            .widgets
            .get(index + 1)
            .map(|next| next.style.resolve(&self.defaults).background)
            .unwrap_or_else(|| self.defaults.background.clone());
        Some((trailing, leading))
    }
}

//  Tests
