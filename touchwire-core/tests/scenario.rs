//! End-to-end scenarios: registry API, wire input and the terminal loop.

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_graphics::mock_display::MockDisplay;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;

use touchwire_core::{Hit, Session, ShapeKind, ShapeRegistry, Terminal, TerminalConfig};
use touchwire_display::{
    Bounds, Color565, GraphicsRenderer, RenderError, Renderer, TextStyle,
};
use touchwire_hal::{RawPoint, TouchCalibration, TouchSource, UartRx, UartTx};
use touchwire_protocol::{Script, TouchReport};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    FillRect(i32, i32, i32, i32, u16),
    DrawRect(i32, i32, i32, i32, u16),
    FillCircle(i32, i32, i32, u16),
    DrawCircle(i32, i32, i32, u16),
    Line(i32, i32, i32, i32),
    Text(i32, i32, String),
}

/// Renderer that records calls and measures text as 6x10 cells
#[derive(Default)]
struct Recording {
    calls: Vec<Call>,
}

impl Renderer for Recording {
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color565) -> Result<(), RenderError> {
        self.calls.push(Call::FillRect(x, y, w, h, color.raw()));
        Ok(())
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color565) -> Result<(), RenderError> {
        self.calls.push(Call::DrawRect(x, y, w, h, color.raw()));
        Ok(())
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color565) -> Result<(), RenderError> {
        self.calls.push(Call::FillCircle(cx, cy, radius, color.raw()));
        Ok(())
    }

    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color565) -> Result<(), RenderError> {
        self.calls.push(Call::DrawCircle(cx, cy, radius, color.raw()));
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, _: Color565) -> Result<(), RenderError> {
        self.calls.push(Call::Line(x0, y0, x1, y1));
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, _: &TextStyle) -> Result<(), RenderError> {
        self.calls.push(Call::Text(x, y, text.to_string()));
        Ok(())
    }

    fn measure_text(&self, x: i32, y: i32, text: &str, style: &TextStyle) -> Bounds {
        let scale = style.scale();
        Bounds::new(x, y, text.chars().count() as i32 * 6 * scale, 10 * scale)
    }
}

/// In-memory serial link
#[derive(Default)]
struct Link {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl Link {
    fn output(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.tx)).unwrap()
    }
}

impl UartRx for Link {
    type Error = Infallible;

    fn bytes_available(&mut self) -> Result<bool, Infallible> {
        Ok(!self.rx.is_empty())
    }

    fn peek(&mut self) -> Result<Option<u8>, Infallible> {
        Ok(self.rx.front().copied())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Infallible> {
        Ok(self.rx.pop_front())
    }
}

impl UartTx for Link {
    type Error = Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Infallible> {
        self.tx.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Touch controller replaying a script, one reading per poll
#[derive(Default)]
struct Scripted {
    readings: VecDeque<Option<RawPoint>>,
    current: Option<RawPoint>,
}

impl Scripted {
    fn press(&mut self, x: u16, y: u16) {
        self.readings.push_back(Some(RawPoint { x, y }));
    }

    fn release(&mut self) {
        self.readings.push_back(None);
    }
}

impl TouchSource for Scripted {
    type Error = Infallible;

    fn is_touched(&mut self) -> Result<bool, Infallible> {
        if let Some(next) = self.readings.pop_front() {
            self.current = next;
        }
        Ok(self.current.is_some())
    }

    fn read_raw(&mut self) -> Result<RawPoint, Infallible> {
        Ok(self.current.unwrap_or(RawPoint { x: 0, y: 0 }))
    }
}

fn identity_config() -> TerminalConfig {
    let mut config = TerminalConfig::default();
    config.touch.calibration = TouchCalibration::identity(320, 240);
    config
}

fn wire(build: impl FnOnce(&mut Script<&mut String>) -> std::fmt::Result) -> String {
    let mut text = String::new();
    build(&mut Script::new(&mut text)).unwrap();
    text
}

fn feed(session: &mut Session<impl Renderer>, input: &str) -> String {
    let mut out = String::new();
    session.feed_all(input.as_bytes(), &mut out).unwrap();
    out
}

#[test]
fn registry_scenario() {
    let mut registry = ShapeRegistry::new();
    registry.add_rect(10, 20, 40, 50, Color565::RED, true, 1).unwrap();
    registry.add_rect(70, 10, 30, 20, Color565::BLUE, false, 1).unwrap();
    registry.add_circle(100, 35, 25, Color565::GREEN, false, 2).unwrap();
    registry.add_circle(200, 100, 50, Color565::ORANGE, true, 0).unwrap();
    registry.add_rect(30, 40, 50, 50, Color565::PURPLE, true, 99).unwrap();

    assert_eq!(registry.find_group_at(15, 20), 1);
    assert_eq!(registry.find_group_at(72, 15), 1);
    assert_eq!(registry.find_group_at(100, 33), 2);
    assert_eq!(registry.find_group_at(200, 200), -1);
    assert_eq!(registry.find_group_at(45, 45), 99);
    assert_eq!(registry.groups().len(), 3);
}

#[test]
fn wire_scenario_matches_registry_scenario() {
    let input = wire(|s| {
        s.rect(10, 20, 40, 50, 0xF800, 1)?;
        s.rect(70, 10, 30, 20, 0x001F, 1)?;
        s.circle(100, 35, 25, 0x07E0, 2)?;
        s.circle(200, 100, 50, 0xFD20, 0)?;
        s.rect(30, 40, 50, 50, 0x780F, 99)
    });

    let mut session = Session::with_renderer(&TerminalConfig::default(), Recording::default());
    assert_eq!(feed(&mut session, &input), "");

    assert_eq!(session.find_group_at(15, 20), 1);
    assert_eq!(session.find_group_at(72, 15), 1);
    assert_eq!(session.find_group_at(100, 33), 2);
    assert_eq!(session.find_group_at(200, 200), -1);
    assert_eq!(session.find_group_at(45, 45), 99);

    let calls = &session.registry().renderer().unwrap().calls;
    assert_eq!(
        calls.as_slice(),
        &[
            Call::FillRect(10, 20, 40, 50, 0xF800),
            Call::FillRect(70, 10, 30, 20, 0x001F),
            Call::FillCircle(100, 35, 12, 0x07E0),
            Call::FillCircle(200, 100, 25, 0xFD20),
            Call::FillRect(30, 40, 50, 50, 0x780F),
        ]
    );
}

#[test]
fn dead_area_occludes_group_below() {
    let mut session = Session::new(&TerminalConfig::default());
    feed(&mut session, "0x0y100w100h5iR50x50y40d0iO");
    assert_eq!(session.hit_at(50, 50), Hit::Absorbed);
    assert_eq!(session.find_group_at(50, 50), -1);
    assert_eq!(session.hit_at(2, 2), Hit::Group(5));
    assert_eq!(session.hit_at(150, 150), Hit::Miss);
}

#[test]
fn attributes_carry_between_commands() {
    let mut session = Session::new(&TerminalConfig::default());
    feed(&mut session, "5x5y10w10h#1Fc3iR");
    feed(&mut session, "40xR");
    let shapes = session.registry().shapes();
    assert_eq!(shapes.len(), 2);
    assert_eq!(
        shapes[1].kind(),
        &ShapeKind::Rect {
            x: 40,
            y: 5,
            w: 10,
            h: 10
        }
    );
    assert_eq!(shapes[1].color(), Color565::BLUE);
    assert_eq!(session.find_group_at(45, 10), 3);
}

#[test]
fn radix_selection() {
    let mut session = Session::new(&TerminalConfig::default());
    feed(&mut session, "#FFx");
    assert_eq!(session.attributes().get(b'x'), 255);
    feed(&mut session, "0#10y");
    assert_eq!(session.attributes().get(b'y'), 16);
    feed(&mut session, "3#12w");
    assert_eq!(session.attributes().get(b'w'), 5);
    feed(&mut session, "12h");
    assert_eq!(session.attributes().get(b'h'), 12);
}

#[test]
fn concave_polygon_from_wire() {
    // Arrow head pointing right with a notch at the back
    let input = wire(|s| s.polygon(&[(0, 0), (20, 10), (0, 20), (8, 10)], 0xFFFF, 7));
    let mut session = Session::new(&TerminalConfig::default());
    feed(&mut session, &input);
    assert_eq!(session.find_group_at(12, 10), 7);
    assert_eq!(session.find_group_at(2, 10), -1);
    assert_eq!(session.find_group_at(5, 4), 7);
    assert!(session.points().is_empty());
}

#[test]
fn text_touchable_only_once_drawn() {
    let input = wire(|s| s.label(10, 10, "Start", 0xFFFF, 0, 1, 0, 4));

    let mut unbound = Session::new(&TerminalConfig::default());
    feed(&mut unbound, &input);
    assert_eq!(unbound.find_group_at(12, 12), -1);

    let mut bound = Session::with_renderer(&TerminalConfig::default(), Recording::default());
    feed(&mut bound, &input);
    assert_eq!(bound.find_group_at(12, 12), 4);
    assert_eq!(bound.find_group_at(39, 19), 4);
    assert_eq!(bound.find_group_at(40, 12), -1);
    assert_eq!(
        bound.registry().renderer().unwrap().calls.last(),
        Some(&Call::Text(10, 10, "Start".to_string()))
    );
}

#[test]
fn dump_reports_attributes_and_points() {
    let mut session = Session::new(&TerminalConfig::default());
    let out = feed(&mut session, "1x2yP3x4yP-?");
    let mut lines = out.split("\r\n");
    let attributes = lines.next().unwrap();
    assert!(attributes.starts_with("a=0, b=0, "));
    assert!(attributes.ends_with("w=0, x=3, y=4, z=0."));
    assert_eq!(lines.next(), Some("points: (1,2) (3,4)."));
    assert_eq!(lines.next(), Some(""));
}

#[test]
fn graph_window_rolls() {
    let mut session = Session::new(&TerminalConfig::default());
    let input = wire(|s| {
        s.graph(&[1, 2], 2)?;
        s.graph(&[3], 2)?;
        s.graph(&[4, 5, 6], 2)
    });
    let out = feed(&mut session, &input);
    assert!(out.ends_with("0:3\r\n1:4,5,6\r\nend\r\n"));
}

#[test]
fn zero_starts_fresh_session() {
    let mut session = Session::with_renderer(&TerminalConfig::default(), Recording::default());
    feed(&mut session, "0x0y10w10h1iR");
    feed(&mut session, "Z");
    assert!(session.registry().is_empty());
    assert_eq!(session.find_group_at(5, 5), -1);
    // Old attributes are gone, a bare Rect is empty
    feed(&mut session, "R");
    assert_eq!(session.find_group_at(0, 0), -1);
}

#[test]
fn terminal_reports_touches() {
    let mut terminal = Terminal::with_renderer(
        Link::default(),
        Scripted::default(),
        Recording::default(),
        identity_config(),
    )
    .unwrap();
    let input = wire(|s| {
        s.rect(10, 20, 40, 50, 0xF800, 1)?;
        s.circle(100, 35, 25, 0x07E0, 2)
    });
    terminal.uart_mut().rx.extend(input.bytes());
    while !terminal.uart().rx.is_empty() {
        assert_eq!(terminal.tick().unwrap(), None);
    }

    let touch = terminal.touch_mut();
    touch.press(15, 25);
    touch.press(15, 25);
    touch.press(100, 33);
    touch.release();
    touch.press(300, 200);

    let mut reports = Vec::new();
    for _ in 0..5 {
        reports.extend(terminal.tick().unwrap());
    }
    assert_eq!(
        reports,
        vec![
            TouchReport::new(1, 15, 25),
            TouchReport::new(2, 100, 33),
            TouchReport::new(-1, 300, 200),
        ]
    );
    assert_eq!(
        terminal.uart_mut().output(),
        "1@X:15Y:25\r\n2@X:100Y:33\r\n-1@X:300Y:200\r\n"
    );
    for line in ["1@X:15Y:25", "2@X:100Y:33"] {
        assert!(TouchReport::parse(line).is_some());
    }
}

#[test]
fn graphics_renderer_end_to_end() {
    let mut display = MockDisplay::<Rgb565>::new();
    display.set_allow_overdraw(true);
    let renderer = GraphicsRenderer::new(display, &FONT_6X10);
    let mut session = Session::with_renderer(&TerminalConfig::default(), renderer);

    feed(&mut session, "2x2y20w10h#F800c1iR\"OK\"30x2y#FFFFc2iT");

    let display = session.registry().renderer().unwrap().target();
    assert_eq!(display.get_pixel(embedded_graphics::prelude::Point::new(5, 5)), Some(Rgb565::new(31, 0, 0)));
    assert_eq!(session.find_group_at(5, 5), 1);
    // "OK" in 6x10 covers 12x10 from (30, 2)
    assert_eq!(session.find_group_at(30, 2), 2);
    assert_eq!(session.find_group_at(42, 2), -1);
}

fn graphics_session() -> Session<GraphicsRenderer<MockDisplay<Rgb565>>> {
    let mut display = MockDisplay::<Rgb565>::new();
    display.set_allow_overdraw(true);
    Session::with_renderer(&TerminalConfig::default(), GraphicsRenderer::new(display, &FONT_6X10))
}

#[test]
fn saturated_coordinates_render_off_screen() {
    let mut session = graphics_session();
    feed(&mut session, "2147483647x0y10w10h#F800c1iR");
    feed(&mut session, "\"OK\"2147483647x0y1iT");
    feed(&mut session, "2147483647x0y2147483647d1iO");
    feed(&mut session, "0x0yP2147483647x2147483647yP0x2147483647yP1iL");
    assert_eq!(session.registry().len(), 4);

    // The polygon reaches back on screen; nothing else does
    let display = session.registry().renderer().unwrap().target();
    assert_eq!(display.get_pixel(embedded_graphics::prelude::Point::new(0, 0)), Some(Rgb565::new(31, 0, 0)));
    assert_eq!(session.find_group_at(2147483647, 0), 1);
}

#[test]
fn custom_quote_delimiter_round_trip() {
    let mut config = TerminalConfig::default();
    config.quote_delimiter = b'\'';
    config.validate().unwrap();

    let mut text = String::new();
    let mut script = Script::with_delimiter(&mut text, b'\'');
    script.label(10, 10, "say \"go\"", 0xFFFF, 0, 1, 0, 6).unwrap();

    let mut session = Session::with_renderer(&config, Recording::default());
    feed(&mut session, &text);
    let calls = &session.registry().renderer().unwrap().calls;
    assert_eq!(calls.as_slice(), &[Call::Text(10, 10, "say \"go\"".to_string())]);
    assert_eq!(session.find_group_at(11, 11), 6);
}
