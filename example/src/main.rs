//! Walks through `DynArray` growth, the capacity API and ordering.
//!
//! Usage: `nox-array-example [pushes]`. Set `RUST_LOG=info` (or `debug`,
//! `trace`) to see the walkthrough; failures are reported at `error`.

use std::process::ExitCode;

use nox_array::{dynarr, DynArray, CapacityError, VecError};

use nox_log::{error, warn, info, debug, trace};

const DEFAULT_PUSHES: usize = 16;

fn main() -> ExitCode {
    if let Err(err) = nox_log::init() {
        eprintln!("failed to initialize logger: {}", err);
        return ExitCode::FAILURE
    }
    let pushes = match std::env::args().nth(1) {
        None => DEFAULT_PUSHES,
        Some(arg) => match arg.parse() {
            Ok(pushes) => pushes,
            Err(_) => {
                error!("invalid push count \"{}\"", arg);
                return ExitCode::FAILURE
            },
        },
    };
    match run(pushes) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        },
    }
}

fn run(pushes: usize) -> nox_array::Result<()> {
    growth(pushes)?;
    capacity_api()?;
    ordering();
    failures();
    Ok(())
}

fn growth(pushes: usize) -> nox_array::Result<()> {
    let mut arr = DynArray::new();
    let mut capacity = arr.capacity();
    for i in 0..pushes {
        arr.push(i)?;
        if arr.capacity() != capacity {
            debug!("push #{} grew capacity {} -> {}", i + 1, capacity, arr.capacity());
            capacity = arr.capacity();
        }
        trace!("len {}, capacity {}", arr.len(), arr.capacity());
    }
    info!("pushed {} values, capacity {}", arr.len(), arr.capacity());
    while let Some(value) = arr.pop() {
        trace!("popped {}", value);
    }
    arr.shrink_to_fit()?;
    info!("after popping everything and shrinking, capacity {}", arr.capacity());
    Ok(())
}

fn capacity_api() -> nox_array::Result<()> {
    let filled = DynArray::with_len(5, 9)?;
    info!("with_len(5, 9) = {:?}, capacity {}", filled, filled.capacity());

    let mut arr = dynarr![1, 2, 3];
    arr.resize_default(1)?;
    info!("[1, 2, 3] resized to 1 = {:?}, capacity {}", arr, arr.capacity());

    let mut arr = dynarr![1, 2, 3];
    arr.resize(5, 7)?;
    info!("[1, 2, 3] resized to 5 with 7 = {:?}", arr);

    let mut copy = arr.try_clone()?;
    copy.push(8)?;
    info!("copy {:?} left the original at {:?}", copy, arr);

    let moved = DynArray::take(&mut copy);
    info!("moved {:?}, source now has len {} and capacity {}", moved, copy.len(), copy.capacity());

    let reversed: Vec<_> = moved.riter().collect();
    debug!("reverse iteration: {:?}", reversed);
    Ok(())
}

fn ordering() {
    let pairs = [
        (dynarr![1, 2], dynarr![1, 2, 3]),
        (dynarr![1, 3], dynarr![1, 2, 9]),
        (DynArray::new(), dynarr![0]),
    ];
    for (a, b) in &pairs {
        info!("{:?} vs {:?}: {:?}", a, b, a.cmp(b));
    }
}

fn failures() {
    let arr = dynarr![1, 2, 3];
    match arr.at(10) {
        Ok(value) => info!("at(10) = {}", value),
        Err(VecError { capacity_error: CapacityError::IndexOutOfBounds { index, len } }) => {
            warn!("at({}) is out of range for len {}", index, len)
        },
        Err(err) => warn!("at(10) failed: {}", err),
    };
    let mut arr = dynarr![1u64, 2, 3];
    if let Err(err) = arr.reserve(usize::MAX) {
        warn!("reserve(usize::MAX) refused: {}, still holding {:?}", err, arr);
    }
}
