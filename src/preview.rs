use pulldown_cmark::{html, Event, Options, Parser};

/// What the preview pane should show for the current editor content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preview {
    /// Blank or whitespace-only content. The pane shows a hint instead of
    /// an empty render.
    Placeholder,
    /// HTML ready for the pane, regenerated from scratch on every change.
    Rendered(String),
}

pub fn render_preview(source: &str) -> Preview {
    if source.trim().is_empty() {
        Preview::Placeholder
    } else {
        Preview::Rendered(markdown_html(source))
    }
}

fn markdown_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    // Raw HTML is demoted to text so pasted markup cannot reach the pane DOM.
    let events = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut rendered = String::new();
    html::push_html(&mut rendered, events);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(source: &str) -> String {
        match render_preview(source) {
            Preview::Rendered(html) => html,
            Preview::Placeholder => panic!("expected a render for {source:?}"),
        }
    }

    #[test]
    fn blank_content_uses_the_placeholder() {
        assert_eq!(render_preview(""), Preview::Placeholder);
        assert_eq!(render_preview("   \n\t  "), Preview::Placeholder);
    }

    #[test]
    fn heading_renders_as_html() {
        assert!(rendered("# Hi").contains("<h1>Hi</h1>"));
    }

    #[test]
    fn emphasis_and_code_render() {
        let html = rendered("*italic* and **bold** and `code`");
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn links_and_images_render() {
        let html = rendered("[docs](https://example.com) ![alt](https://example.com/a.png)");
        assert!(html.contains("<a href=\"https://example.com\">docs</a>"));
        assert!(html.contains("<img src=\"https://example.com/a.png\" alt=\"alt\""));
    }

    #[test]
    fn tables_are_enabled() {
        let html = rendered("| A | B |\n| - | - |\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn strikethrough_is_enabled() {
        assert!(rendered("~~gone~~").contains("<del>gone</del>"));
    }

    #[test]
    fn task_lists_are_enabled() {
        let html = rendered("- [x] done\n- [ ] open");
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn block_html_is_neutralized() {
        let html = rendered("<script>alert('x')</script>");
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn inline_html_is_neutralized() {
        let html = rendered("before <b onmouseover=\"x()\">bold</b> after");
        assert!(!html.contains("<b "));
        assert!(html.contains("&lt;b"));
        assert!(html.contains("bold"));
    }

    #[test]
    fn every_nonblank_change_rerenders_fully() {
        let first = rendered("# One");
        let second = rendered("# Two");
        assert_ne!(first, second);
        assert_eq!(rendered("# One"), first);
    }

    #[test]
    fn patched_content_flows_from_the_buffer_into_the_render() {
        use crate::edit_core::EditBuffer;
        use crate::records::{Post, PostPatch, Record, RecordPatch};

        let mut buffer = EditBuffer::new();
        buffer.seed(vec![Record::Post(Post {
            id: 1,
            title: Some("A".to_string()),
            content: Some(String::new()),
            ..Post::default()
        })]);

        let content = |buffer: &EditBuffer| {
            buffer
                .get(1)
                .and_then(Record::as_post)
                .and_then(|post| post.content.clone())
                .unwrap_or_default()
        };

        assert_eq!(render_preview(&content(&buffer)), Preview::Placeholder);

        assert!(buffer.patch(1, RecordPatch::Post(PostPatch::content("# Hi"))));
        match render_preview(&content(&buffer)) {
            Preview::Rendered(html) => assert!(html.contains("<h1>Hi</h1>")),
            Preview::Placeholder => panic!("patched content still shows the placeholder"),
        }
    }
}
