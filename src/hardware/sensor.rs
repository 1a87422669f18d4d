/// Length units a [`DistanceSensor`] can report in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceUnit {
    Inch,
    Cm,
    Mm,
    Meter,
}

impl DistanceUnit {
    fn per_inch(self) -> f64 {
        match self {
            DistanceUnit::Inch => 1.0,
            DistanceUnit::Cm => 2.54,
            DistanceUnit::Mm => 25.4,
            DistanceUnit::Meter => 0.0254,
        }
    }

    pub fn from_inches(self, inches: f64) -> f64 {
        inches * self.per_inch()
    }

    pub fn to_inches(self, distance: f64) -> f64 {
        distance / self.per_inch()
    }
}

/// Downward-facing range sensor. Only the simulator writes its reading.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceSensor {
    inches: f64,
}

impl DistanceSensor {
    pub(crate) fn new() -> DistanceSensor {
        DistanceSensor::default()
    }

    pub fn distance(&self, unit: DistanceUnit) -> f64 {
        unit.from_inches(self.inches)
    }

    pub(crate) fn set_distance(&mut self, unit: DistanceUnit, distance: f64) {
        self.inches = unit.to_inches(distance);
    }
}
