use crate::{vector, Angle, Vector};

/// Walks around a circle in equal angular steps.
///
/// The sine and cosine of the step are computed once, and each step applies
/// the same rotation to the previous offset, so the cost of a step is four
/// multiplications. This is how round joins and caps are approximated.
///
/// The iterator yields the offsets after each rotation, so the starting offset
/// itself is not part of the output and the last item lands on the end of the
/// arc (within floating point precision).
#[derive(Clone, Debug)]
pub struct ArcStepper {
    offset: Vector,
    cos: f32,
    sin: f32,
    remaining: u32,
}

impl ArcStepper {
    /// Rotate `start` by `sweep` in `steps` equal increments.
    ///
    /// A positive sweep goes counter-clockwise.
    pub fn new(start: Vector, sweep: Angle, steps: u32) -> Self {
        debug_assert!(steps > 0);
        let step = (sweep.radians / steps as f32) as f64;
        ArcStepper {
            offset: start,
            cos: step.cos() as f32,
            sin: step.sin() as f32,
            remaining: steps,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Iterator for ArcStepper {
    type Item = Vector;

    fn next(&mut self) -> Option<Vector> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let v = self.offset;
        self.offset = vector(v.x * self.cos - v.y * self.sin, v.x * self.sin + v.y * self.cos);

        Some(self.offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ArcStepper {}

#[test]
fn quarter_turn() {
    let steps: Vec<Vector> =
        ArcStepper::new(vector(2.0, 0.0), Angle::degrees(90.0), 4).collect();

    assert_eq!(steps.len(), 4);
    let last = *steps.last().unwrap();
    assert!((last - vector(0.0, 2.0)).length() < 1e-5, "{:?}", last);
    for v in &steps {
        assert!((v.length() - 2.0).abs() < 1e-5);
    }
}

#[test]
fn clockwise_half_turn() {
    let mut stepper = ArcStepper::new(vector(0.0, 1.0), Angle::degrees(-180.0), 3);
    assert_eq!(stepper.len(), 3);

    let first = stepper.next().unwrap();
    // Clockwise from "up" goes towards +x first.
    assert!(first.x > 0.0);

    let last = stepper.last().unwrap();
    assert!((last - vector(0.0, -1.0)).length() < 1e-5, "{:?}", last);
}
