use gary_core::UnitSystem;
use gary_potential::io::{from_str, to_string};
use gary_potential::{DocumentFormat, PotentialKind, PotentialModel};
use proptest::prelude::*;

fn unit_system(idx: usize) -> UnitSystem {
    match idx {
        0 => UnitSystem::galactic(),
        1 => UnitSystem::solar_system(),
        _ => UnitSystem::si(),
    }
}

proptest! {
    #[test]
    fn documents_round_trip_every_kind(
        kind_idx in 0usize..PotentialKind::ALL.len(),
        units_idx in 0usize..3,
        values in prop::collection::vec(-1e15f64..1e15, 6),
    ) {
        let kind = PotentialKind::ALL[kind_idx];
        let parameters = kind
            .schema()
            .iter()
            .zip(values.iter().copied())
            .map(|(spec, value)| (spec.name, value));
        let model = PotentialModel::new(kind, parameters, unit_system(units_idx)).unwrap();

        for format in [DocumentFormat::Yaml, DocumentFormat::Json] {
            let text = to_string(&model, format).unwrap();
            let restored: PotentialModel = from_str(&text, format).unwrap();
            prop_assert_eq!(&restored, &model);
            prop_assert_eq!(to_string(&restored, format).unwrap(), text);
        }
    }
}
