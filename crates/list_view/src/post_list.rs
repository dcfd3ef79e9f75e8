use shared::{domain::Post, props::ListProps};

use crate::view::{RenderedView, View};

pub const NO_RESULTS_TEXT: &str = "No results.";

/// Plain rendering of the accumulated posts, one line each. Knows nothing
/// about loading, errors or pagination.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostListView;

pub fn format_post(index: usize, post: &Post) -> String {
    let author = if post.author.is_empty() {
        "[deleted]"
    } else {
        post.author.as_str()
    };
    format!(
        "{:>4}. [{:>5}] {} (u/{}, {} comments)",
        index + 1,
        post.score,
        post.title,
        author,
        post.num_comments
    )
}

impl View<ListProps> for PostListView {
    fn render(&self, props: &ListProps) -> RenderedView {
        match &props.posts {
            None => RenderedView::Empty,
            Some(posts) if posts.is_empty() => {
                RenderedView::Lines(vec![NO_RESULTS_TEXT.to_string()])
            }
            Some(posts) => RenderedView::Lines(
                posts
                    .iter()
                    .enumerate()
                    .map(|(index, post)| format_post(index, post))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(name: &str, title: &str, author: &str) -> Post {
        Post {
            name: name.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            score: 42,
            num_comments: 7,
            permalink: String::new(),
            url: String::new(),
            subreddit: "rust".to_string(),
        }
    }

    #[test]
    fn renders_nothing_before_first_search() {
        assert_eq!(PostListView.render(&ListProps::default()), RenderedView::Empty);
    }

    #[test]
    fn renders_no_results_for_empty_search() {
        let props = ListProps {
            posts: Some(Vec::new()),
            ..ListProps::default()
        };
        assert_eq!(PostListView.render(&props).to_lines(), vec![NO_RESULTS_TEXT]);
    }

    #[test]
    fn renders_one_line_per_post_in_order() {
        let props = ListProps {
            posts: Some(vec![post("t3_a", "First", "ferris"), post("t3_b", "Second", "")]),
            ..ListProps::default()
        };
        let lines = PostListView.render(&props).to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "   1. [   42] First (u/ferris, 7 comments)");
        assert!(lines[1].contains("Second (u/[deleted]"));
    }
}
