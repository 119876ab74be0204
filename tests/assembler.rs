mod support;

use blog_archive::archive::{ArchiveMetadata, CategoryEntry, ImageEntry};
use blog_archive::fragment::{self, Element};
use blog_archive::ArchiveUnit;

use support::{assembler, key, FakeProbe};

const POST: &str = r#"
<div class="post">
  <h2>Old title</h2>
  <div data-bar="activities"><span>loading</span></div>
  <div data-bar="mood"></div>
  <p>Text with <img src="./inline.jpg" alt="inline"></p>
  <div class="image-grid"></div>
  <div class="image-grid">
    <p class="caption">Trip</p>
    <img src="./tall.jpg" alt="tall">
    <div class="item"><img src="./wide.jpg" alt="wide"></div>
  </div>
</div>"#;

fn metadata() -> ArchiveMetadata {
    let image = |name: &str, width: f64, height: f64| ImageEntry {
        width,
        height,
        name: Some(name.to_string()),
        url: None,
        alt: None,
    };
    ArchiveMetadata {
        activities: Some(vec![
            CategoryEntry { label: "Deep Work".to_string(), hours: 5.0 },
            CategoryEntry { label: "Rest".to_string(), hours: 0.0 },
        ]),
        mood: None,
        images: Some(vec![image("p.jpg", 600.0, 900.0), image("l.jpg", 1600.0, 900.0)]),
    }
}

fn grids(post: &Element) -> Vec<&Element> {
    post.find_all(&|e| e.has_class("image-grid"))
}

fn item_srcs(grid: &Element) -> Vec<String> {
    grid.child_elements()
        .filter(|e| e.has_class("item"))
        .filter_map(|item| item.find_first(&|e| e.is("img")))
        .filter_map(|img| img.attr("src").map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_full_assembly() {
    let post = fragment::select_first(POST, ".post").unwrap();
    let unit = ArchiveUnit {
        key: key(2025, 7),
        post,
        metadata: Some(metadata()),
    };
    let probe = FakeProbe::default()
        .with_size("2025/07/tall.jpg", 500, 1000)
        .with_size("2025/07/wide.jpg", 2000, 1000);

    let fragment = assembler(probe).assemble(unit).await;
    let post = &fragment.post;

    // Localized headings replace the old one, Polish first.
    let headings: Vec<String> = post.find_all(&|e| e.is("h2")).iter().map(|h| h.text()).collect();
    assert_eq!(headings, vec!["Lipiec 2025", "July 2025"]);

    // Activities bar drawn, zero-hour entries skipped; mood has no data.
    let segments = post.find_all(&|e| e.has_class("segment"));
    assert_eq!(segments.len(), 1);
    assert!(segments[0].has_class("deep-work"));
    assert_eq!(segments[0].attr("data-hours"), Some("5"));
    let activities = post
        .find_first(&|e| e.attr("data-bar") == Some("activities"))
        .unwrap();
    assert!(activities.find_first(&|e| e.is("span")).is_none());

    // Inline images outside grids only get their path rewritten.
    let inline = post
        .find_first(&|e| e.attr("alt") == Some("inline"))
        .unwrap();
    assert_eq!(inline.attr("src"), Some("2025/07/inline.jpg"));
    assert!(!inline.has_attr("data-fullscreen-enabled"));

    let grids = grids(post);
    assert_eq!(grids.len(), 2);

    // Empty grid populated from the sidecar, widest first.
    assert_eq!(grids[0].attr("data-count"), Some("2"));
    assert_eq!(item_srcs(grids[0]), vec!["2025/07/l.jpg", "2025/07/p.jpg"]);

    // Authored grid: bare image wrapped, items reordered after the caption.
    let authored = grids[1];
    assert_eq!(authored.attr("data-count"), Some("2"));
    assert!(authored.child_elements().next().unwrap().has_class("caption"));
    assert_eq!(item_srcs(authored), vec!["2025/07/wide.jpg", "2025/07/tall.jpg"]);
    let first_item = authored.child_elements().nth(1).unwrap();
    assert!(first_item.has_class("landscape"));

    // Both grids were laid out.
    let indices: Vec<usize> = fragment.grids.iter().map(|g| g.index).collect();
    assert_eq!(indices, vec![0, 1]);

    let viewer_images: Vec<String> = fragment.images().into_iter().map(|i| i.src).collect();
    assert_eq!(
        viewer_images,
        vec![
            "2025/07/l.jpg",
            "2025/07/p.jpg",
            "2025/07/wide.jpg",
            "2025/07/tall.jpg"
        ]
    );
}

#[tokio::test]
async fn test_assembly_without_metadata_leaves_empty_grids() {
    let post = fragment::select_first(POST, ".post").unwrap();
    let unit = ArchiveUnit {
        key: key(2025, 7),
        post,
        metadata: None,
    };

    let fragment = assembler(FakeProbe::default()).assemble(unit).await;
    let grids = grids(&fragment.post);
    assert!(item_srcs(grids[0]).is_empty());
    assert!(fragment.post.find_first(&|e| e.has_class("progress-bar")).is_none());
    assert_eq!(fragment.grids.len(), 1);
    assert_eq!(fragment.grids[0].index, 1);
}

#[tokio::test]
async fn test_linked_grid_images_are_ordered() {
    let html = r#"<div class="post"><div class="image-grid">
        <a href="./tall.jpg"><img src="./tall.jpg" alt="tall"></a>
        <a href="./wide.jpg"><img src="./wide.jpg" alt="wide"></a>
    </div></div>"#;
    let unit = ArchiveUnit {
        key: key(2025, 7),
        post: fragment::select_first(html, ".post").unwrap(),
        metadata: None,
    };
    let probe = FakeProbe::default()
        .with_size("2025/07/tall.jpg", 500, 1000)
        .with_size("2025/07/wide.jpg", 2000, 1000);

    let fragment = assembler(probe).assemble(unit).await;

    let grid = grids(&fragment.post)[0];
    let order: Vec<String> = grid
        .find_all(&|e| e.is("img"))
        .into_iter()
        .filter_map(|img| img.attr("src").map(str::to_string))
        .collect();
    assert_eq!(order, vec!["2025/07/wide.jpg", "2025/07/tall.jpg"]);
    assert!(grid.child_elements().next().unwrap().has_class("landscape"));
    assert_eq!(fragment.grids.len(), 1);
    assert_eq!(fragment.grids[0].images.len(), 2);
}
