use std::{cell::RefCell, error::Error, rc::Rc};

use circe_wires::{
    route, EventStatus, HeadlessSurface, Key, PxPoint, RcRSurface, Wire, WireConfig,
    WireContext, WireError, WireEvent, WireRegistry,
};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// raw pointer positions of the connections drawn in the demo
const CLICKS: [((f64, f64), (f64, f64)); 3] = [
    ((13., 27.), (187., 102.)),
    ((191., 98.), (305., 96.)),
    ((298., 104.), (402., 97.)),
];

fn pair_mut<T>(v: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (l, r) = v.split_at_mut(j);
        (&mut l[i], &mut r[0])
    } else {
        let (l, r) = v.split_at_mut(i);
        (&mut r[0], &mut l[j])
    }
}

/// merge every mergeable pair, returns the number of merges
fn coalesce(wires: &mut Vec<Wire>) -> Result<usize, WireError> {
    let mut merged = 0;
    for i in 0..wires.len() {
        for j in 0..wires.len() {
            if i == j || wires[i].is_deleted() || wires[j].is_deleted() {
                continue;
            }
            let (a, b) = pair_mut(wires, i, j);
            if a.merge(Some(b))? {
                merged += 1;
            }
        }
    }
    wires.retain(|w| !w.is_deleted());
    Ok(merged)
}

fn print_wires(wires: &[Wire]) -> Result<(), Box<dyn Error>> {
    for w in wires {
        let rect = w.rendered()?;
        println!(
            "{} {:?} ({}, {}) -> ({}, {})  box l{} t{} w{} h{}",
            w.id().to_string().green(),
            w.orientation(),
            w.start().x,
            w.start().y,
            w.end().x,
            w.end().y,
            rect.origin.x,
            rect.origin.y,
            rect.size.width,
            rect.size.height,
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => WireConfig::load(path)?,
        None => WireConfig::default(),
    };

    let surface = Rc::new(RefCell::new(HeadlessSurface::default()));
    let registry = Rc::new(WireRegistry::default());
    let ctx = WireContext::new(RcRSurface::new(surface.clone()), &registry, config.clone());

    let mut wires = vec![];
    for ((x0, y0), (x1, y1)) in CLICKS {
        let (src, dst) = (config.snap(x0, y0), config.snap(x1, y1));
        for seg in route(src, dst) {
            wires.push(Wire::from_segment(seg, registry.allocate(), &ctx));
        }
    }
    println!("{}", "routed".blue());
    print_wires(&wires)?;

    let merged = coalesce(&mut wires)?;
    println!("{} {}", "merges:".blue(), merged);
    print_wires(&wires)?;

    // hover the first wire, read its tooltip, then delete it from the keyboard
    if let Some(first) = wires.first_mut() {
        first.set_voltage(3.3)?;
        let at = first.start() + (first.end() - first.start()) / 2;
        first.handle_event(&WireEvent::MouseOver(at))?;
        if let Some(tip) = first.tooltip() {
            if let Some(state) = surface.borrow().element(tip) {
                println!("{} {:?}", "tooltip:".blue(), state.text);
            }
        }
        first.handle_event(&WireEvent::MouseMove(at + PxPoint::new(5, 0).to_vector()))?;
        let status = first.handle_event(&WireEvent::KeyDown(Key::Backspace))?;
        if status == EventStatus::Captured {
            println!("{} {}", "deleted".red(), first.id());
        }
    }
    wires.retain(|w| !w.is_deleted());

    println!(
        "{} {} wires, {} elements, {} listeners",
        "remaining:".blue(),
        registry.len(),
        surface.borrow().element_count(),
        surface.borrow().listener_count(),
    );
    let snapshots: Vec<_> = wires.iter().map(Wire::snapshot).collect();
    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}
