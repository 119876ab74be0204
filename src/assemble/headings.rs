use crate::archive::ArchiveKey;
use crate::fragment::Element;
use crate::page::{month_name, Lang};

/// Drop the first `h2` the upstream content may already carry.
pub fn remove_old_heading(post: &mut Element) {
    post.remove_first(&|e| e.is("h2"));
}

/// Prepend one `{month} {year}` heading per locale.
///
/// Each heading goes to the very top in turn, so the last locale ends up first.
pub fn insert_localized_headings(post: &mut Element, key: ArchiveKey) {
    for lang in Lang::ALL {
        let heading = Element::new("h2")
            .with_attr("lang", lang.code())
            .with_text(&format!("{} {}", month_name(lang, key.month), key.year));
        post.prepend(heading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_existing_heading() {
        let mut post = Element::new("div")
            .with_class("post")
            .with_child(Element::new("h2").with_text("Stale"))
            .with_child(Element::new("p").with_text("Body"));

        remove_old_heading(&mut post);
        insert_localized_headings(&mut post, ArchiveKey::new(2025, 7));

        let headings: Vec<(Option<&str>, String)> = post
            .find_all(&|e| e.is("h2"))
            .into_iter()
            .map(|h| (h.attr("lang"), h.text()))
            .collect();
        assert_eq!(
            headings,
            vec![
                (Some("pl"), "Lipiec 2025".to_string()),
                (Some("en"), "July 2025".to_string()),
            ]
        );
        assert!(post.child_elements().last().unwrap().is("p"));
    }

    #[test]
    fn test_without_existing_heading() {
        let mut post = Element::new("div").with_class("post");
        remove_old_heading(&mut post);
        insert_localized_headings(&mut post, ArchiveKey::new(2021, 1));
        assert_eq!(post.child_elements().count(), 2);
        assert_eq!(post.child_elements().nth(1).unwrap().text(), "January 2021");
    }
}
