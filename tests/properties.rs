use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fmt::Debug;

use tree_pricing_engine::calculation::{
    EmployeeCode, JobPricingInputs, MARGIN_TIERS, MemberCost, aggregate_loadout, billing_rate,
    billing_rate_table, calculate_pricing, generate_employee_code, parse_employee_code,
};
use tree_pricing_engine::models::{
    BufferMode, CareerTrack, CodeTable, CrossTraining, DriverLicense, Employee,
    EquipmentCertification, LeadershipLevel, PricingOptions, ProfessionalCertification, TierLevel,
    TransportMode,
};

fn pick<T: CodeTable + Debug>() -> impl Strategy<Value = T> {
    (0..T::all().len()).prop_map(|i| T::all()[i])
}

/// Any subset of a lookup table, chosen by a membership mask.
fn subset<T: CodeTable + Debug + Ord>() -> impl Strategy<Value = BTreeSet<T>> {
    proptest::collection::vec(any::<bool>(), T::all().len()).prop_map(|mask| {
        T::all()
            .iter()
            .zip(mask)
            .filter(|(_, held)| *held)
            .map(|(entry, _)| *entry)
            .collect()
    })
}

/// Non-negative amount with two decimal places, up to 10,000.00.
fn money() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strictly positive amount with two decimal places, up to 10,000.00.
fn positive_money() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn employee_strategy() -> impl Strategy<Value = Employee> {
    (
        pick::<CareerTrack>(),
        pick::<TierLevel>(),
        proptest::option::of(pick::<LeadershipLevel>()),
        subset::<EquipmentCertification>(),
        subset::<DriverLicense>(),
        subset::<ProfessionalCertification>(),
        proptest::collection::vec((pick::<CareerTrack>(), pick::<TierLevel>()), 0..3),
    )
        .prop_map(
            |(track, tier, leadership, equipment, drivers, certs, cross)| {
                let mut employee =
                    Employee::new("emp_prop", "Property Employee", track, tier, Decimal::ONE);
                employee.leadership = leadership;
                employee.equipment_certifications = equipment;
                employee.driver_licenses = drivers;
                employee.professional_certs = certs;
                employee.cross_training = cross
                    .into_iter()
                    .map(|(role, tier)| CrossTraining { role, tier })
                    .collect();
                employee
            },
        )
}

fn options_strategy() -> impl Strategy<Value = PricingOptions> {
    (
        prop_oneof![
            Just(TransportMode::RoundTripMinutes),
            (1i64..=10).prop_map(|r| TransportMode::Scaled {
                transport_rate: Decimal::new(r, 2)
            }),
        ],
        prop_oneof![Just(BufferMode::ProductionOnly), Just(BufferMode::ProductionAndTransport)],
    )
        .prop_map(|(transport, buffer)| PricingOptions { transport, buffer })
}

fn inputs_strategy() -> impl Strategy<Value = JobPricingInputs> {
    (
        positive_money(),
        positive_rate(),
        money(),
        positive_money(),
        (0i64..=100).prop_map(Decimal::from),
    )
        .prop_map(
            |(billing_rate, production_rate, drive_time_minutes, work_units, buffer_percentage)| {
                JobPricingInputs {
                    billing_rate,
                    production_rate,
                    drive_time_minutes,
                    work_units,
                    buffer_percentage,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_codes_parse_back_strictly(employee in employee_strategy()) {
        let code = generate_employee_code(&employee);
        let parsed: EmployeeCode = code.parse().unwrap();
        prop_assert_eq!(&parsed, &EmployeeCode::from(&employee));
        prop_assert_eq!(parsed.to_string(), code);
    }

    #[test]
    fn generated_codes_are_fully_recognized(employee in employee_strategy()) {
        let parsed = parse_employee_code(&generate_employee_code(&employee));
        prop_assert!(parsed.is_fully_recognized());
        prop_assert_eq!(parsed.career_track, Some(employee.career_track));
        prop_assert_eq!(parsed.tier, Some(employee.tier));
        prop_assert_eq!(parsed.leadership, employee.leadership);
        prop_assert_eq!(&parsed.driver_licenses, &employee.driver_licenses);
        prop_assert_eq!(parsed.cross_training.len(), employee.cross_training.len());
    }

    #[test]
    fn billing_rate_recovers_cost_at_margin(cost in money(), margin_index in 0usize..MARGIN_TIERS.len()) {
        let margin = MARGIN_TIERS[margin_index];
        let rate = billing_rate(cost, margin).unwrap();
        prop_assert!(rate >= cost);
        prop_assert_eq!((rate * (Decimal::ONE - margin)).round_dp(6), cost.round_dp(6));
    }

    #[test]
    fn billing_rates_rise_with_margin(cost in money()) {
        let table = billing_rate_table(cost).unwrap();
        prop_assert_eq!(table.len(), MARGIN_TIERS.len());
        for pair in table.windows(2) {
            prop_assert!(pair[0].rate <= pair[1].rate);
        }
    }

    #[test]
    fn loadout_total_is_sum_of_parts(
        equipment in proptest::collection::vec(money(), 0..6),
        labor in proptest::collection::vec(money(), 0..6),
        overhead in money(),
    ) {
        let equipment_costs: Vec<MemberCost> = equipment
            .iter()
            .enumerate()
            .map(|(i, c)| MemberCost::new(format!("eq_{}", i), *c))
            .collect();
        let labor_costs: Vec<MemberCost> = labor
            .iter()
            .enumerate()
            .map(|(i, c)| MemberCost::new(format!("emp_{}", i), *c))
            .collect();

        let costs = aggregate_loadout(&equipment_costs, &labor_costs, overhead, 1).unwrap();

        let equipment_sum: Decimal = equipment.iter().copied().sum();
        let labor_sum: Decimal = labor.iter().copied().sum();
        prop_assert_eq!(costs.total_equipment_cost, equipment_sum);
        prop_assert_eq!(costs.total_labor_cost, labor_sum);
        prop_assert_eq!(costs.total_loadout_cost, equipment_sum + labor_sum + overhead);
    }

    #[test]
    fn more_work_costs_more(
        inputs in inputs_strategy(),
        extra in positive_money(),
        options in options_strategy(),
    ) {
        let base = calculate_pricing(&inputs, options, 1).unwrap();
        let larger = JobPricingInputs { work_units: inputs.work_units + extra, ..inputs };
        let more = calculate_pricing(&larger, options, 1).unwrap();

        prop_assert!(more.production_hours > base.production_hours);
        prop_assert!(more.total_hours > base.total_hours);
        prop_assert!(more.line_total > base.line_total);
    }

    #[test]
    fn larger_buffer_lengthens_job(
        inputs in inputs_strategy(),
        extra in 1i64..=50,
        options in options_strategy(),
    ) {
        let base = calculate_pricing(&inputs, options, 1).unwrap();
        let padded = JobPricingInputs {
            buffer_percentage: inputs.buffer_percentage + Decimal::from(extra),
            ..inputs
        };
        let more = calculate_pricing(&padded, options, 1).unwrap();

        prop_assert!(more.buffer_hours > base.buffer_hours);
        prop_assert!(more.total_hours > base.total_hours);
    }

    #[test]
    fn total_hours_is_sum_of_components(inputs in inputs_strategy(), options in options_strategy()) {
        let result = calculate_pricing(&inputs, options, 1).unwrap();
        prop_assert_eq!(
            result.total_hours,
            result.production_hours + result.transport_hours + result.buffer_hours
        );
        prop_assert_eq!(result.line_total, result.total_hours * inputs.billing_rate);
    }

    #[test]
    fn pricing_is_deterministic(inputs in inputs_strategy(), options in options_strategy()) {
        let first = calculate_pricing(&inputs, options, 1).unwrap();
        let second = calculate_pricing(&inputs, options, 1).unwrap();
        prop_assert_eq!(first, second);
    }
}
