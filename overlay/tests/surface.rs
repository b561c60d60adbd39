use hudkit_core::{
    Canvas, HudElement, HudStyle, HudWidget, Point, PointerAction, Refresh, Renderable, Settings,
    Size, WidgetFrame,
};
use hudkit_overlay::{HudSurface, StopwatchWidget, SurfaceError, TextWidget};
use hudkit_types::{Anchor, Theme};

const BLUE: [u8; 4] = [0, 0, 255, 255];

/// Solid block of a fixed size
struct Block(Size);

impl Renderable for Block {
    fn measure(&mut self, _: &mut dyn Canvas, _: &Settings, _: &HudStyle) -> Size {
        self.0
    }

    fn on_render(&mut self, frame: &mut WidgetFrame<'_>) -> Refresh {
        frame
            .canvas
            .fill_rect(0.0, 0.0, frame.size.width, frame.size.height, BLUE);
        Refresh::Idle
    }
}

fn block(name: &str, anchor: Anchor, offset: (i32, i32)) -> HudElement<Block> {
    let mut el = HudElement::new(name, Block(Size::new(100.0, 40.0))).with_offset(offset.0, offset.1);
    el.settings_mut()
        .set_from_str("Alignment", anchor.label())
        .unwrap();
    el
}

fn surface() -> HudSurface {
    HudSurface::new(1000, 600, Theme::Dark).unwrap()
}

#[test]
fn test_drag_scenario_bottom_right() {
    let mut s = surface();
    s.add(block("box", Anchor::RightBottom, (0, 0))).unwrap();
    s.set_edit_mode(true);
    s.render_frame();

    let origin = s.widget("box").unwrap().borrow().position_in(1000, 600);
    assert_eq!(origin, Point::new(900.0, 560.0));
    assert_eq!(s.canvas().pixel(950, 580), Some(BLUE));

    assert!(s.dispatch_pointer(PointerAction::Down, 950.0, 580.0));
    assert!(s.dispatch_pointer(PointerAction::Move, 800.0, 500.0));
    {
        let w = s.widget("box").unwrap().borrow();
        assert_eq!(w.position_in(1000, 600), Point::new(750.0, 480.0));
        assert_eq!(w.offset(), (-250, -120));
        assert!(w.is_dragging());
    }

    assert!(!s.dispatch_pointer(PointerAction::Up, 800.0, 500.0));
    assert!(!s.widget("box").unwrap().borrow().is_dragging());

    s.render_frame();
    assert_eq!(s.canvas().pixel(760, 490), Some(BLUE));
    assert_eq!(s.canvas().pixel(950, 580), Some([0, 0, 0, 0]));
}

#[test]
fn test_pointer_ignored_outside_edit_mode() {
    let mut s = surface();
    s.add(block("box", Anchor::LeftTop, (100, 100))).unwrap();
    s.render_frame();

    assert!(!s.dispatch_pointer(PointerAction::Down, 150.0, 120.0));
    assert!(!s.widget("box").unwrap().borrow().is_dragging());
}

#[test]
fn test_leaving_edit_mode_cancels_drag() {
    let mut s = surface();
    s.add(block("box", Anchor::LeftTop, (100, 100))).unwrap();
    s.set_edit_mode(true);
    s.render_frame();

    assert!(s.dispatch_pointer(PointerAction::Down, 150.0, 120.0));
    s.set_edit_mode(false);
    assert!(!s.widget("box").unwrap().borrow().is_dragging());
}

#[test]
fn test_edit_mode_border_uses_theme_accent() {
    let mut s = surface();
    s.add(block("box", Anchor::LeftTop, (100, 100))).unwrap();
    s.render_frame();
    assert_eq!(s.canvas().pixel(92, 120), Some([0, 0, 0, 0]));

    s.set_edit_mode(true);
    s.render_frame();
    assert_eq!(s.canvas().pixel(92, 120), Some(Theme::Dark.accent()));

    s.set_theme(Theme::Light);
    s.render_frame();
    assert_eq!(s.canvas().pixel(92, 120), Some(Theme::Light.accent()));
}

#[test]
fn test_duplicate_and_unknown_names() {
    let mut s = surface();
    s.add(block("box", Anchor::LeftTop, (0, 0))).unwrap();

    let err = s.add(block("box", Anchor::Center, (0, 0))).unwrap_err();
    assert!(matches!(err, SurfaceError::DuplicateWidget(name) if name == "box"));
    assert!(matches!(s.remove("nope"), Err(SurfaceError::UnknownWidget(_))));
    assert!(s.enable("nope").is_err());
}

#[test]
fn test_disable_and_enable() {
    let mut s = surface();
    s.add(block("box", Anchor::LeftTop, (0, 0))).unwrap();

    assert!(s.disable("box").unwrap());
    assert!(!s.disable("box").unwrap());
    s.render_frame();
    assert_eq!(s.canvas().pixel(10, 10), Some([0, 0, 0, 0]));

    assert!(s.enable("box").unwrap());
    s.render_frame();
    assert_eq!(s.canvas().pixel(10, 10), Some(BLUE));
}

#[test]
fn test_remove_keeps_other_lookups_valid() {
    let mut s = surface();
    s.add(block("a", Anchor::LeftTop, (0, 0))).unwrap();
    s.add(block("b", Anchor::LeftTop, (200, 0))).unwrap();
    s.add(block("c", Anchor::LeftTop, (400, 0))).unwrap();

    let removed = s.remove("a").unwrap();
    assert!(!removed.is_registered());
    assert_eq!(s.widget("c").unwrap().borrow().name(), "c");
    assert_eq!(s.widgets().count(), 2);

    s.render_frame();
    assert_eq!(s.canvas().pixel(10, 10), Some([0, 0, 0, 0]));
    assert_eq!(s.canvas().pixel(410, 10), Some(BLUE));
}

#[test]
fn test_overlapping_widgets_first_added_wins() {
    let mut s = surface();
    s.add(block("first", Anchor::LeftTop, (0, 0))).unwrap();
    s.add(block("second", Anchor::LeftTop, (50, 0))).unwrap();
    s.set_edit_mode(true);
    s.render_frame();

    assert!(s.dispatch_pointer(PointerAction::Down, 75.0, 20.0));
    assert!(s.widget("first").unwrap().borrow().is_dragging());
    assert!(!s.widget("second").unwrap().borrow().is_dragging());
}

#[test]
fn test_refresh_flag_follows_stopwatch() {
    let mut s = surface();
    s.add(HudElement::new("label", TextWidget::new("hello")))
        .unwrap();
    assert!(!s.render_frame());

    s.add(HudElement::new("watch", StopwatchWidget::started()))
        .unwrap();
    assert!(s.render_frame());

    s.disable("watch").unwrap();
    assert!(!s.render_frame());
}

#[test]
fn test_resize() {
    let mut s = surface();
    assert!(matches!(
        s.resize(0, 10),
        Err(SurfaceError::InvalidSize { width: 0, height: 10 })
    ));
    s.resize(320, 200).unwrap();
    assert_eq!((s.width(), s.height()), (320, 200));
    assert!(HudSurface::new(0, 0, Theme::Dark).is_err());
}
