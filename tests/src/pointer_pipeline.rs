//! Device bytes through the decoder and input queue into the desktop.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use gemos_abi::{InputEvent, MouseButtons};
use gemos_drivers::input_event::{self, InputQueue};
use gemos_drivers::mouse::{self, PacketDecoder};
use gemos_gfx::DrawBuffer;
use gemos_wm::theme::COLOR_BLACK;
use gemos_wm::{
    Capabilities, Desktop, DesktopConfig, NoClock, NoLauncher, WindowApp, WindowState,
};

use crate::{Machine, encode_packet};

const NONE: MouseButtons = MouseButtons::empty();
const LEFT: MouseButtons = MouseButtons::LEFT;

fn machine() -> Machine<DrawBuffer> {
    let cfg = DesktopConfig {
        screen_width: 640,
        screen_height: 480,
        ..DesktopConfig::default()
    };
    let desktop = Desktop::new(cfg, Box::new(NoLauncher), Box::new(NoClock));
    Machine::new(desktop, DrawBuffer::new(640, 480))
}

struct Keys {
    typed: Rc<RefCell<String>>,
}

impl WindowApp for Keys {
    fn capabilities(&self) -> Capabilities {
        Capabilities::KEY
    }

    fn key(&mut self, _w: &WindowState, c: char) {
        self.typed.borrow_mut().push(c);
    }
}

#[test]
fn encoded_packets_decode_to_the_same_motion() {
    let mut decoder = PacketDecoder::new(640, 480);
    let mut last = None;
    for byte in encode_packet(-170, 95, LEFT) {
        last = decoder.feed(byte);
    }
    let sample = last.unwrap();
    assert_eq!((sample.x, sample.y), (150, 335));
    assert_eq!(sample.buttons, LEFT);
}

#[test]
fn title_bar_drag_from_raw_bytes() {
    let mut m = machine();
    let id = m.desktop.create_window(300, 200, 200, 150, "Drag").unwrap();

    // Cursor starts at the screen centre, inside the content area.
    m.step(0, -30, NONE);
    assert_eq!(m.desktop.router().pointer().y, 210);

    m.step(0, 0, LEFT);
    assert_eq!(m.desktop.router().drag_target(), Some(id));

    m.step(25, 25, LEFT);
    m.step(0, 0, NONE);

    let pos = m.desktop.windows().get(id).map(|s| (s.x, s.y));
    assert_eq!(pos, Some((325, 225)));
    assert_eq!(m.desktop.router().drag_target(), None);

    let theme = *m.desktop.theme();
    assert_eq!(m.fb.front_pixel(330, 230), theme.title_focused);
    assert_eq!(m.fb.front_pixel(310, 230), theme.desktop);
}

#[test]
fn motion_coalesces_behind_a_slow_frame() {
    let mut m = machine();
    for _ in 0..10 {
        m.irq_bytes(&encode_packet(5, 0, NONE));
    }
    assert_eq!(m.queue.len(), 1);
    assert_eq!(m.frame(), 1);
    assert_eq!(m.desktop.router().pointer().x, 370);
    assert_eq!(m.fb.front_pixel(370, 240), COLOR_BLACK);
}

#[test]
fn press_and_release_edges_survive_coalescing() {
    let mut queue = InputQueue::new();
    let mut decoder = PacketDecoder::new(640, 480);
    let packets = [
        (-100, -80, NONE),
        (-70, -50, NONE),
        (0, 0, LEFT),
        (30, 20, LEFT),
        (0, 0, NONE),
    ];
    for (dx, dy, buttons) in packets {
        for byte in encode_packet(dx, dy, buttons) {
            if let Some(sample) = decoder.feed(byte) {
                queue.push(InputEvent::Pointer(sample));
            }
        }
    }

    let samples: Vec<(i32, i32, MouseButtons)> = core::iter::from_fn(|| queue.pop())
        .filter_map(|event| match event {
            InputEvent::Pointer(s) => Some((s.x, s.y, s.buttons)),
            InputEvent::Key(_) => None,
        })
        .collect();
    // Only the leading hover motion merges; the press keeps its own spot.
    assert_eq!(
        samples,
        [
            (150, 110, NONE),
            (150, 110, LEFT),
            (180, 130, LEFT),
            (180, 130, NONE),
        ]
    );
}

#[test]
fn press_then_held_motion_in_one_frame_still_drags() {
    let mut m = machine();
    let id = m.desktop.create_window(300, 200, 200, 150, "Drag").unwrap();
    m.step(0, -30, NONE);

    // Press on the title bar and move before the main loop runs.
    m.irq_bytes(&encode_packet(0, 0, LEFT));
    m.irq_bytes(&encode_packet(40, 40, LEFT));
    m.frame();

    assert_eq!(m.desktop.router().drag_target(), Some(id));
    let pos = m.desktop.windows().get(id).map(|s| (s.x, s.y));
    assert_eq!(pos, Some((340, 240)));

    m.step(0, 0, NONE);
    assert_eq!(m.desktop.router().drag_target(), None);
}

#[test]
fn line_noise_is_dropped_until_a_frame_start() {
    let mut m = machine();
    // Neither byte has the always-one bit, so both are discarded.
    m.irq_bytes(&[0x00, 0x37]);
    // Overflowed packet: consumed whole, no motion.
    m.irq_bytes(&[0xC8, 0x40, 0x40]);
    m.irq_bytes(&encode_packet(10, 10, NONE));

    let stats = m.decoder.stats();
    assert_eq!(stats.resync_drops, 2);
    assert_eq!(stats.overflow_drops, 1);
    assert_eq!(stats.packets, 1);
    assert!(!m.decoder.mid_packet());

    m.frame();
    let p = m.desktop.router().pointer();
    assert_eq!((p.x, p.y), (330, 250));
}

#[test]
fn keys_and_clicks_keep_arrival_order() {
    let mut m = machine();
    let first = Rc::new(RefCell::new(String::new()));
    let second = Rc::new(RefCell::new(String::new()));
    m.desktop
        .open_app(0, 30, 200, 150, "A", Box::new(Keys { typed: first.clone() }))
        .unwrap();
    m.desktop
        .open_app(250, 200, 200, 150, "B", Box::new(Keys { typed: second.clone() }))
        .unwrap();

    // 'x' reaches B, the click focuses A, 'y' reaches A, all in one frame.
    m.irq_key('x');
    m.irq_bytes(&encode_packet(-220, -140, NONE));
    m.irq_bytes(&encode_packet(0, 0, LEFT));
    m.irq_bytes(&encode_packet(0, 0, NONE));
    m.irq_key('y');

    assert_eq!(m.frame(), 5);
    assert_eq!(second.borrow().as_str(), "x");
    assert_eq!(first.borrow().as_str(), "y");
}

// The only test in this binary that touches the global decoder and queue.
#[test]
fn interrupt_entry_points_feed_the_global_queue() {
    mouse::init(640, 480);
    for byte in encode_packet(-20, 10, NONE) {
        mouse::handle_irq(byte);
    }
    input_event::route_key('k');
    assert_eq!(mouse::get_position(), (300, 250));

    let mut m = machine();
    let handled = m.desktop.pump(input_event::drain());
    assert_eq!(handled, 2);
    assert_eq!(input_event::pending(), 0);
    let p = m.desktop.router().pointer();
    assert_eq!((p.x, p.y), (300, 250));
}
