use std::cell::RefCell;
use std::rc::Rc;

use layered_paint::event::BusError;
use layered_paint::{Handler, Message, MessageBus, Outbox};

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Debug)]
struct Stroke(u32);
impl Message for Stroke {}

// Wraps a Stroke but is its own message type
#[derive(Debug)]
struct TaggedStroke(Stroke);
impl Message for TaggedStroke {}

#[derive(Debug)]
struct Outer;
impl Message for Outer {}

#[derive(Debug)]
struct Inner;
impl Message for Inner {}

struct Recorder {
    name: &'static str,
    log: Log,
}

impl Recorder {
    fn new(name: &'static str, log: &Log) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            name,
            log: Rc::clone(log),
        }))
    }

    fn record(&self, what: &str) {
        self.log.borrow_mut().push(format!("{}:{}", self.name, what));
    }
}

impl Handler<Stroke> for Recorder {
    fn handle(&mut self, message: &Stroke, _outbox: &mut Outbox) {
        self.record(&format!("stroke{}", message.0));
    }
}

impl Handler<TaggedStroke> for Recorder {
    fn handle(&mut self, message: &TaggedStroke, _outbox: &mut Outbox) {
        self.record(&format!("tagged{}", message.0.0));
    }
}

impl Handler<Outer> for Recorder {
    fn handle(&mut self, _message: &Outer, outbox: &mut Outbox) {
        self.record("outer");
        if self.name == "first" {
            outbox.post(Inner);
        }
    }
}

impl Handler<Inner> for Recorder {
    fn handle(&mut self, _message: &Inner, _outbox: &mut Outbox) {
        self.record("inner");
    }
}

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn test_handlers_fire_in_registration_order() {
    let log = new_log();
    let bus = MessageBus::new();
    let a = Recorder::new("a", &log);
    let b = Recorder::new("b", &log);
    let c = Recorder::new("c", &log);

    bus.register::<Stroke, _>(&b).unwrap();
    bus.register::<Stroke, _>(&a).unwrap();
    bus.register::<Stroke, _>(&c).unwrap();

    bus.post(Stroke(1));

    assert_eq!(*log.borrow(), vec!["b:stroke1", "a:stroke1", "c:stroke1"]);
}

#[test]
fn test_dispatch_is_by_exact_type() {
    let log = new_log();
    let bus = MessageBus::new();
    let only_strokes = Recorder::new("plain", &log);
    let only_tagged = Recorder::new("tagged", &log);

    bus.register::<Stroke, _>(&only_strokes).unwrap();
    bus.register::<TaggedStroke, _>(&only_tagged).unwrap();

    // A message containing a Stroke is not a Stroke
    bus.post(TaggedStroke(Stroke(2)));
    assert_eq!(*log.borrow(), vec!["tagged:tagged2"]);

    bus.post(Stroke(3));
    assert_eq!(*log.borrow(), vec!["tagged:tagged2", "plain:stroke3"]);
}

#[test]
fn test_nested_posts_are_delivered_depth_first() {
    let log = new_log();
    let bus = MessageBus::new();
    let first = Recorder::new("first", &log);
    let second = Recorder::new("second", &log);

    bus.register::<Outer, _>(&first).unwrap();
    bus.register::<Outer, _>(&second).unwrap();
    bus.register::<Inner, _>(&first).unwrap();
    bus.register::<Inner, _>(&second).unwrap();

    bus.post(Outer);

    // The Inner queued by `first` is fully delivered before `second` sees Outer
    assert_eq!(
        *log.borrow(),
        vec!["first:outer", "first:inner", "second:inner", "second:outer"]
    );
}

#[test]
fn test_post_returns_after_all_handlers() {
    let log = new_log();
    let bus = MessageBus::new();
    let first = Recorder::new("first", &log);
    bus.register::<Outer, _>(&first).unwrap();
    bus.register::<Inner, _>(&first).unwrap();

    bus.post(Outer);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_duplicate_registration_fails_fast() {
    let log = new_log();
    let bus = MessageBus::new();
    let recorder = Recorder::new("dup", &log);

    bus.register::<Stroke, _>(&recorder).unwrap();
    // Same subscriber, different message type, is fine
    bus.register::<TaggedStroke, _>(&recorder).unwrap();

    let err = bus.register::<Stroke, _>(&recorder).unwrap_err();
    assert!(matches!(err, BusError::DuplicateSubscription { .. }));

    bus.post(Stroke(4));
    assert_eq!(*log.borrow(), vec!["dup:stroke4"]);
}
