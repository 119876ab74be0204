use crate::fragment::Element;

/// Point `./name` image sources into the unit's folder, e.g. `2025/07/name`.
pub fn rewrite_image_paths(post: &mut Element, base_path: &str) {
    post.walk_mut(&mut |el| {
        if !el.is("img") {
            return;
        }
        let rewritten = el
            .attr("src")
            .and_then(|src| src.strip_prefix("./"))
            .map(|rest| format!("{}/{}", base_path, rest));
        if let Some(src) = rewritten {
            el.set_attr("src", &src);
        }
    });
}
