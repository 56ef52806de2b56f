use crate::cdp::protocol::Rect;

use super::core::full_page_clip;

#[test]
fn test_full_page_clip() {
    let clip = full_page_clip(Rect {
        x: 0.0,
        y: 0.0,
        width: 1280.0,
        height: 2047.5,
    });
    assert_eq!(clip.x, 0.0);
    assert_eq!(clip.width, 1280.0);
    assert_eq!(clip.height, 2048.0);
    assert_eq!(clip.scale, 1.0);
}
