//! Flex message containers and components.
//!
//! A flex message is a tree of typed nodes the LINE platform renders as
//! rich cards. The JSON shape here must stay bit-exact with the
//! platform grammar: lowercase `type` tags, camelCase field keys, and
//! optional fields omitted rather than serialized as null.

use serde::{Deserialize, Serialize};

/// Top-level flex container: a single card or a swipeable set of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexContainer {
    Bubble(Bubble),
    Carousel(Carousel),
}

/// A single card with optional header, hero image, and body regions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bubble {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<FlexComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<FlexComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<FlexComponent>,
}

/// An ordered set of bubbles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Carousel {
    pub contents: Vec<FlexContainer>,
}

/// A block-level or leaf node inside a bubble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexComponent {
    Box(FlexBox),
    Text(FlexText),
    Image(FlexImage),
    Filler,
    Separator(FlexSeparator),
}

/// Box layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexBox {
    pub layout: Layout,
    pub contents: Vec<FlexComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexText {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlexSeparator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
}

/// Payload sent back into the bot when a tappable node is tapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Message { text: String },
}

impl Action {
    /// A tap that re-issues `text` as an inbound message.
    pub fn message(text: impl Into<String>) -> Self {
        Action::Message { text: text.into() }
    }
}

impl Bubble {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: FlexBox) -> Self {
        self.header = Some(FlexComponent::Box(header));
        self
    }

    pub fn hero(mut self, hero: FlexImage) -> Self {
        self.hero = Some(FlexComponent::Image(hero));
        self
    }

    pub fn body(mut self, body: FlexBox) -> Self {
        self.body = Some(FlexComponent::Box(body));
        self
    }
}

impl Carousel {
    pub fn new(bubbles: impl IntoIterator<Item = Bubble>) -> Self {
        Self {
            contents: bubbles.into_iter().map(FlexContainer::Bubble).collect(),
        }
    }
}

impl FlexBox {
    pub fn vertical(contents: Vec<FlexComponent>) -> Self {
        Self::with_layout(Layout::Vertical, contents)
    }

    pub fn horizontal(contents: Vec<FlexComponent>) -> Self {
        Self::with_layout(Layout::Horizontal, contents)
    }

    fn with_layout(layout: Layout, contents: Vec<FlexComponent>) -> Self {
        Self {
            layout,
            contents,
            spacing: None,
            margin: None,
            flex: None,
        }
    }

    pub fn spacing(mut self, spacing: impl Into<String>) -> Self {
        self.spacing = Some(spacing.into());
        self
    }

    pub fn margin(mut self, margin: impl Into<String>) -> Self {
        self.margin = Some(margin.into());
        self
    }

    pub fn flex(mut self, flex: u32) -> Self {
        self.flex = Some(flex);
        self
    }

    pub fn component(self) -> FlexComponent {
        FlexComponent::Box(self)
    }
}

impl FlexText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wrap: None,
            size: None,
            color: None,
            weight: None,
            flex: None,
            action: None,
        }
    }

    pub fn wrap(mut self) -> Self {
        self.wrap = Some(true);
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn flex(mut self, flex: u32) -> Self {
        self.flex = Some(flex);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn component(self) -> FlexComponent {
        FlexComponent::Text(self)
    }
}

impl FlexImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            size: None,
            aspect_ratio: None,
            aspect_mode: None,
            action: None,
        }
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(ratio.into());
        self
    }

    pub fn aspect_mode(mut self, mode: impl Into<String>) -> Self {
        self.aspect_mode = Some(mode.into());
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn component(self) -> FlexComponent {
        FlexComponent::Image(self)
    }
}

impl FlexSeparator {
    pub fn component(self) -> FlexComponent {
        FlexComponent::Separator(self)
    }
}
