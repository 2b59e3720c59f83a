//! Flex card construction from Qiita records.
//!
//! Pure transforms: domain records in, a flex tree out. Tappable nodes
//! carry message actions that re-issue bot commands, so cards double as
//! in-card navigation (tap a tag chip to run `tags/<name>`).

use line_client::flex::{
    Action, Bubble, Carousel, FlexBox, FlexComponent, FlexImage, FlexSeparator, FlexText,
};
use qiita_client::{Item, ItemTag, Tag, User};

const MUTED: &str = "#999999";
const CHIP: &str = "#1e90ff";

/// One bubble per item. An empty slice yields an empty carousel.
pub fn items_carousel(items: &[Item]) -> Carousel {
    Carousel::new(items.iter().map(item_bubble))
}

fn item_bubble(item: &Item) -> Bubble {
    let header = FlexBox::vertical(vec![
        FlexBox::horizontal(vec![
            FlexText::new(format!("posted at {}", format_date(&item.created_at)))
                .size("sm")
                .color(MUTED)
                .component(),
            FlexComponent::Filler,
            FlexText::new(format!("{} likes", item.likes_count))
                .size("sm")
                .color(MUTED)
                .component(),
        ])
        .component(),
        FlexText::new(item.user.id.clone())
            .size("sm")
            .weight("bold")
            .component(),
    ])
    .spacing("sm");

    let hero = avatar(&item.user.profile_image_url)
        .action(Action::message(format!("users/{}", item.user.id)));

    let body = FlexBox::vertical(vec![
        FlexText::new(item.title.clone()).wrap().component(),
        tag_chip_row(&item.tags).margin("md").component(),
    ])
    .spacing("md");

    Bubble::new().header(header).hero(hero).body(body)
}

/// A user profile bubble with their most recent items.
///
/// Callers must special-case an empty `items` slice before calling;
/// a user with no posts gets a plain-text reply instead of a card.
pub fn user_bubble(user: &User, items: &[Item]) -> Bubble {
    let header = FlexBox::vertical(vec![FlexText::new(user.id.clone())
        .size("lg")
        .weight("bold")
        .component()]);

    let hero = avatar(&user.profile_image_url);

    // The renderer rejects empty text nodes, so an absent description
    // becomes a single space.
    let description = user
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(" ");

    let mut contents = vec![
        FlexText::new(description).wrap().size("sm").component(),
        FlexSeparator::default().component(),
    ];
    for (i, item) in items.iter().enumerate() {
        // Separators go between consecutive blocks, never after the last.
        if i > 0 {
            contents.push(FlexSeparator::default().component());
        }
        contents.push(user_item_block(item));
    }

    Bubble::new()
        .header(header)
        .hero(hero)
        .body(FlexBox::vertical(contents).spacing("md"))
}

fn user_item_block(item: &Item) -> FlexComponent {
    FlexBox::vertical(vec![
        FlexText::new(format_date(&item.created_at))
            .size("xs")
            .color(MUTED)
            .component(),
        FlexText::new(item.title.clone()).wrap().component(),
        tag_chip_row(&item.tags).component(),
        FlexBox::horizontal(vec![
            FlexComponent::Filler,
            FlexText::new(format!("{} likes", item.likes_count))
                .size("xs")
                .color(MUTED)
                .component(),
        ])
        .component(),
    ])
    .spacing("sm")
    .component()
}

/// A single-bubble carousel for a tag and its top items.
pub fn tag_carousel(tag: &Tag, items: &[Item]) -> Carousel {
    let header = FlexBox::vertical(vec![
        FlexText::new(tag.id.clone()).size("lg").weight("bold").component(),
        FlexText::new(format!(
            "{} items, {} followers",
            tag.items_count, tag.followers_count
        ))
        .size("sm")
        .color(MUTED)
        .component(),
    ]);

    let rows = items
        .iter()
        .map(|item| tag_item_row(tag, item))
        .collect::<Vec<_>>();

    let mut bubble = Bubble::new()
        .header(header)
        .body(FlexBox::vertical(rows).spacing("md"));
    if let Some(icon_url) = &tag.icon_url {
        bubble = bubble.hero(avatar(icon_url));
    }

    Carousel::new(vec![bubble])
}

fn tag_item_row(tag: &Tag, item: &Item) -> FlexComponent {
    FlexBox::horizontal(vec![
        // The avatar re-issues the tag command, same as tapping the card.
        FlexImage::new(item.user.profile_image_url.clone())
            .size("xs")
            .aspect_ratio("1:1")
            .aspect_mode("cover")
            .action(Action::message(format!("tags/{}", tag.id)))
            .component(),
        FlexText::new(item.title.clone())
            .wrap()
            .size("sm")
            .flex(4)
            .component(),
    ])
    .spacing("md")
    .component()
}

fn tag_chip_row(tags: &[ItemTag]) -> FlexBox {
    FlexBox::horizontal(
        tags.iter()
            .map(|tag| {
                FlexText::new(tag.name.clone())
                    .size("xs")
                    .color(CHIP)
                    .action(Action::message(format!("tags/{}", tag.name)))
                    .component()
            })
            .collect(),
    )
    .spacing("sm")
}

fn avatar(url: &str) -> FlexImage {
    FlexImage::new(url)
        .size("full")
        .aspect_ratio("1:1")
        .aspect_mode("cover")
}

/// Trim an ISO 8601 timestamp down to its date. Anything unparsable is
/// shown as-is.
fn format_date(created_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use line_client::flex::FlexContainer;

    fn fixture_user(id: &str, description: Option<&str>) -> User {
        User {
            id: id.to_string(),
            name: Some("Fixture".into()),
            description: description.map(String::from),
            profile_image_url: format!("https://qiita.test/avatars/{id}.png"),
            followers_count: 10,
            followees_count: 5,
            items_count: 42,
            permanent_id: 1,
            facebook_id: None,
            github_login_name: None,
            linkedin_id: None,
            twitter_screen_name: None,
            website_url: None,
            organization: None,
            location: None,
        }
    }

    fn fixture_item(id: &str, title: &str, likes: u64) -> Item {
        Item {
            id: id.to_string(),
            title: title.to_string(),
            body: "body".into(),
            rendered_body: "<p>body</p>".into(),
            created_at: "2024-05-01T12:34:56+09:00".into(),
            updated_at: "2024-05-02T00:00:00+09:00".into(),
            url: format!("https://qiita.test/items/{id}"),
            likes_count: likes,
            comments_count: 0,
            reactions_count: 0,
            page_views_count: None,
            coediting: false,
            private: false,
            group: None,
            user: fixture_user("alice", Some("writes things")),
            tags: vec![
                ItemTag {
                    name: "rust".into(),
                    versions: vec![],
                },
                ItemTag {
                    name: "web".into(),
                    versions: vec![],
                },
            ],
        }
    }

    fn fixture_tag() -> Tag {
        Tag {
            id: "rust".into(),
            icon_url: Some("https://qiita.test/icons/rust.png".into()),
            items_count: 120,
            followers_count: 34,
        }
    }

    fn body_contents(bubble: &Bubble) -> &[FlexComponent] {
        match bubble.body.as_ref().unwrap() {
            FlexComponent::Box(b) => &b.contents,
            other => panic!("body is not a box: {other:?}"),
        }
    }

    fn texts(component: &FlexComponent) -> Vec<&str> {
        let mut found = Vec::new();
        collect_texts(component, &mut found);
        found
    }

    fn collect_texts<'a>(component: &'a FlexComponent, found: &mut Vec<&'a str>) {
        match component {
            FlexComponent::Text(t) => found.push(&t.text),
            FlexComponent::Box(b) => {
                for child in &b.contents {
                    collect_texts(child, found);
                }
            }
            _ => {}
        }
    }

    #[test]
    fn items_carousel_has_one_bubble_per_item() {
        let items = vec![fixture_item("a", "First", 1), fixture_item("b", "Second", 2)];
        let carousel = items_carousel(&items);
        assert_eq!(carousel.contents.len(), 2);
    }

    #[test]
    fn items_carousel_empty_input_is_empty_carousel() {
        let carousel = items_carousel(&[]);
        assert!(carousel.contents.is_empty());
    }

    #[test]
    fn item_bubble_header_shows_date_and_likes() {
        let items = vec![fixture_item("a", "First", 12)];
        let carousel = items_carousel(&items);
        let FlexContainer::Bubble(bubble) = &carousel.contents[0] else {
            panic!("carousel element is not a bubble");
        };
        let header = bubble.header.as_ref().unwrap();
        let header_texts = texts(header);
        assert_eq!(
            header_texts,
            vec!["posted at 2024-05-01", "12 likes", "alice"]
        );
    }

    #[test]
    fn item_bubble_hero_links_to_author() {
        let items = vec![fixture_item("a", "First", 1)];
        let carousel = items_carousel(&items);
        let FlexContainer::Bubble(bubble) = &carousel.contents[0] else {
            panic!("carousel element is not a bubble");
        };
        let FlexComponent::Image(hero) = bubble.hero.as_ref().unwrap() else {
            panic!("hero is not an image");
        };
        assert_eq!(hero.action, Some(Action::message("users/alice")));
    }

    #[test]
    fn item_bubble_tag_chips_link_to_tags() {
        let items = vec![fixture_item("a", "First", 1)];
        let carousel = items_carousel(&items);
        let FlexContainer::Bubble(bubble) = &carousel.contents[0] else {
            panic!("carousel element is not a bubble");
        };
        let body = body_contents(bubble);
        let FlexComponent::Box(chip_row) = &body[1] else {
            panic!("second body element is not the chip row");
        };
        let actions: Vec<_> = chip_row
            .contents
            .iter()
            .map(|c| match c {
                FlexComponent::Text(t) => t.action.clone().unwrap(),
                other => panic!("chip is not a text: {other:?}"),
            })
            .collect();
        assert_eq!(
            actions,
            vec![Action::message("tags/rust"), Action::message("tags/web")]
        );
    }

    #[test]
    fn user_bubble_interleaves_separators_between_blocks() {
        let user = fixture_user("alice", Some("writes things"));
        let items = vec![
            fixture_item("a", "First", 1),
            fixture_item("b", "Second", 2),
            fixture_item("c", "Third", 3),
        ];
        let bubble = user_bubble(&user, &items);
        let body = body_contents(&bubble);

        // description, separator, then blocks with separators between
        let after_description = &body[2..];
        let blocks = after_description
            .iter()
            .filter(|c| matches!(c, FlexComponent::Box(_)))
            .count();
        let separators = after_description
            .iter()
            .filter(|c| matches!(c, FlexComponent::Separator(_)))
            .count();
        assert_eq!(blocks, 3);
        assert_eq!(separators, 2);
        assert!(matches!(
            after_description.last().unwrap(),
            FlexComponent::Box(_)
        ));
    }

    #[test]
    fn user_bubble_single_item_has_no_block_separator() {
        let user = fixture_user("alice", Some("writes things"));
        let items = vec![fixture_item("a", "Only", 1)];
        let bubble = user_bubble(&user, &items);
        let body = body_contents(&bubble);

        let after_description = &body[2..];
        assert_eq!(after_description.len(), 1);
        assert!(matches!(after_description[0], FlexComponent::Box(_)));
    }

    #[test]
    fn user_bubble_missing_description_becomes_single_space() {
        for description in [None, Some("")] {
            let user = fixture_user("alice", description);
            let bubble = user_bubble(&user, &[fixture_item("a", "Only", 1)]);
            let body = body_contents(&bubble);
            let FlexComponent::Text(text) = &body[0] else {
                panic!("first body element is not the description");
            };
            assert_eq!(text.text, " ");
        }
    }

    #[test]
    fn tag_carousel_is_single_bubble_with_item_rows() {
        let tag = fixture_tag();
        let items = vec![fixture_item("a", "First", 1), fixture_item("b", "Second", 2)];
        let carousel = tag_carousel(&tag, &items);

        assert_eq!(carousel.contents.len(), 1);
        let FlexContainer::Bubble(bubble) = &carousel.contents[0] else {
            panic!("carousel element is not a bubble");
        };

        let header_texts = texts(bubble.header.as_ref().unwrap());
        assert_eq!(header_texts, vec!["rust", "120 items, 34 followers"]);

        let body = body_contents(bubble);
        assert_eq!(body.len(), 2);
        for row in body {
            let FlexComponent::Box(row) = row else {
                panic!("row is not a box");
            };
            let FlexComponent::Image(avatar) = &row.contents[0] else {
                panic!("first row element is not an avatar");
            };
            // The avatar reuses the tag command, not the author command.
            assert_eq!(avatar.action, Some(Action::message("tags/rust")));
        }
    }

    #[test]
    fn tag_without_icon_has_no_hero() {
        let tag = Tag {
            icon_url: None,
            ..fixture_tag()
        };
        let carousel = tag_carousel(&tag, &[]);
        let FlexContainer::Bubble(bubble) = &carousel.contents[0] else {
            panic!("carousel element is not a bubble");
        };
        assert!(bubble.hero.is_none());
    }

    #[test]
    fn unparsable_timestamp_falls_back_to_raw_string() {
        let mut item = fixture_item("a", "First", 1);
        item.created_at = "yesterday".into();
        let carousel = items_carousel(&[item]);
        let FlexContainer::Bubble(bubble) = &carousel.contents[0] else {
            panic!("carousel element is not a bubble");
        };
        let header_texts = texts(bubble.header.as_ref().unwrap());
        assert_eq!(header_texts[0], "posted at yesterday");
    }
}
