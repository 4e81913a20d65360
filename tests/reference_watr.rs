mod fixtures;

use fixtures::{
    assert_near, load_reference_bars, load_reference_observations, load_watr_ref, scrambled,
};
use chrono::Days;
use std::num::NonZero;
use technical_analysis::{IndicatorKind, Options, ValidationError, Watr, WatrConfig, true_range};

const REF_PATH: &str = "tests/fixtures/data/watr-14.csv";

/// Same arithmetic in the same order as the reference, so only parse noise.
const TOLERANCE: f64 = 1e-9;

fn config() -> WatrConfig {
    WatrConfig::with_period(NonZero::new(14).unwrap()).unwrap()
}

#[test]
fn watr_14_matches_reference() {
    let data = load_reference_observations();
    let reference = load_watr_ref(REF_PATH);

    let output = Watr::calculate(&data, &config()).unwrap();

    assert_eq!(output.len(), reference.len());
    for (i, (actual, expected)) in output.iter().zip(&reference).enumerate() {
        assert_eq!(actual.date_time(), expected.date_time, "date at record {i}");
        assert_near(
            actual.atr(),
            expected.atr,
            TOLERANCE,
            &format!("ATR(14) at record {i} ({})", expected.date_time),
        );
        match (actual.watr(), expected.watr) {
            (Some(a), Some(e)) => assert_near(
                a,
                e,
                TOLERANCE,
                &format!("WATR(14) at record {i} ({})", expected.date_time),
            ),
            (None, None) => {}
            (a, e) => panic!("WATR presence mismatch at record {i}: actual={a:?}, expected={e:?}"),
        }
    }
}

#[test]
fn output_is_most_recent_first() {
    let bars = load_reference_bars();
    let output = Watr::calculate(&load_reference_observations(), &config()).unwrap();

    assert_eq!(output.len(), bars.len() - 14);
    assert_eq!(output[0].date_time(), bars[bars.len() - 1].date_time);
    assert_eq!(output[output.len() - 1].date_time(), bars[14].date_time);
    assert!(output.windows(2).all(|w| w[0].date_time() > w[1].date_time()));
}

#[test]
fn only_oldest_record_lacks_watr() {
    let output = Watr::calculate(&load_reference_observations(), &config()).unwrap();
    let (oldest, newer) = output.split_last().unwrap();

    assert_eq!(oldest.watr(), None);
    assert!(newer.iter().all(|v| v.watr().is_some()));
}

#[test]
fn input_order_does_not_matter() {
    let data = load_reference_observations();
    let mut reversed = data.clone();
    reversed.reverse();

    let expected = Watr::calculate(&data, &config()).unwrap();
    assert_eq!(Watr::calculate(&reversed, &config()).unwrap(), expected);
    assert_eq!(Watr::calculate(&scrambled(&data), &config()).unwrap(), expected);
}

#[test]
fn default_options_use_period_14() {
    let data = load_reference_observations();
    let by_config = Watr::calculate(&data, &config()).unwrap();
    let by_options = Watr::calculate_with_options(&data, &Options::new()).unwrap();
    let by_kind = IndicatorKind::Watr.calculate(&data, &Options::new()).unwrap();

    assert_eq!(by_options, by_config);
    assert_eq!(by_kind.len(), by_config.len());
}

#[test]
fn too_short_prefix_is_rejected() {
    let data = load_reference_observations();

    assert_eq!(
        Watr::calculate(&data[..14], &config()),
        Err(ValidationError::InsufficientData {
            required: 15,
            actual: 14,
        })
    );
    assert_eq!(Watr::calculate(&data[..15], &config()).unwrap().len(), 1);
}

#[test]
fn oldest_record_is_mean_of_first_true_ranges() {
    let bars = load_reference_bars();
    let output = Watr::calculate(&load_reference_observations(), &config()).unwrap();

    let seed: f64 = bars[..15]
        .windows(2)
        .map(|pair| true_range(pair[1].high, pair[1].low, pair[0].close))
        .sum::<f64>()
        / 14.0;

    let oldest = output.last().unwrap();
    assert_eq!(oldest.date_time(), bars[14].date_time);
    assert_near(oldest.atr(), seed, TOLERANCE, "seed ATR");
}

/// Published WATR(14) for AAPL daily bars, 2018-10-29 to 2019-01-09, most
/// recent first: `(date, atr, watr)`.
const PUBLISHED_AAPL: [(&str, f64, Option<f64>); 49] = [
    ("2019-01-09", 6.103013600253306, Some(6.187841482322449)),
    ("2019-01-08", 6.195553107965099, Some(6.358124160449819)),
    ("2019-01-07", 6.3729033470393395, Some(6.615672172792113)),
    ("2019-01-04", 6.637742066042365, Some(6.65733349377612)),
    ("2019-01-03", 6.6591145326610075, Some(6.006103377912746)),
    ("2019-01-02", 5.946738727481086, Some(6.0402908172393674)),
    ("2018-12-31", 6.048795552671939, Some(6.254608059591112)),
    ("2018-12-28", 6.273318287492855, Some(6.435731756482736)),
    ("2018-12-27", 6.450496617299998, Some(6.404698301853203)),
    ("2018-12-26", 6.400534818630767, Some(6.110764837893193)),
    ("2018-12-24", 6.084422112371596, Some(6.163708286961899)),
    ("2018-12-21", 6.170916121015564, Some(6.004570462882046)),
    ("2018-12-20", 5.989448130324453, Some(5.931588703616561)),
    ("2018-12-19", 5.926328755734025, Some(5.754723732099887)),
    ("2018-12-18", 5.739123275405874, Some(5.890664019184493)),
    ("2018-12-17", 5.904440450437095, Some(5.924497148865352)),
    ("2018-12-14", 5.926320485086102, Some(5.944394365444739)),
    ("2018-12-13", 5.946037445477343, Some(6.120629829453308)),
    ("2018-12-12", 6.1365018643602145, Some(6.3372167394112555)),
    ("2018-12-11", 6.355463546234078, Some(6.465848796289045)),
    ("2018-12-10", 6.475883819021315, Some(6.455849985747178)),
    ("2018-12-07", 6.4540287281768025, Some(6.456428189779014)),
    ("2018-12-06", 6.456646322651943, Some(6.469807281300476)),
    ("2018-12-04", 6.471003732086706, Some(6.324407841400514)),
    ("2018-12-03", 6.311080942247224, Some(6.307631521508248)),
    ("2018-11-30", 6.307317937804704, Some(6.519372407778112)),
    ("2018-11-29", 6.538650086866604, Some(6.640093362222582)),
    ("2018-11-28", 6.649315478164034, Some(6.62106208239355)),
    ("2018-11-27", 6.618493591868961, Some(6.810887370782796)),
    ("2018-11-26", 6.828377714320418, Some(6.979160758278908)),
    ("2018-11-23", 6.9928683077296805, Some(7.155955175582414)),
    ("2018-11-21", 7.1707812544781175, Some(7.414105573704139)),
    ("2018-11-20", 7.43622596636105, Some(7.230767540912148)),
    ("2018-11-19", 7.212089502234975, Some(7.1184547876489805)),
    ("2018-11-16", 7.109942540868436, Some(7.2227942584937725)),
    ("2018-11-15", 7.233053505550622, Some(7.378525227095858)),
    ("2018-11-14", 7.391749929054517, Some(7.310078449692977)),
    ("2018-11-13", 7.302653769751019, Some(7.413553074028333)),
    ("2018-11-12", 7.423634828962634, Some(7.194019336133076)),
    ("2018-11-09", 7.173145200421298, Some(7.238943900451003)),
    ("2018-11-08", 7.244925600453705, Some(7.518157533819029)),
    ("2018-11-07", 7.542996800488605, Some(7.631349138984596)),
    ("2018-11-06", 7.63938116975696, Some(7.957350354803926)),
    ("2018-11-05", 7.98625664435365, Some(7.892915766711918)),
    ("2018-11-02", 7.884430232380852, Some(7.256473389792323)),
    ("2018-11-01", 7.199386404102457, Some(7.3156892915712195)),
    ("2018-10-31", 7.326262281341107, Some(7.3386910319484935)),
    ("2018-10-30", 7.339820918367347, Some(7.44064162414966)),
    ("2018-10-29", 7.449807142857144, None),
];

mod published_table {
    use super::*;
    use technical_analysis::{Field, Observation, Timestamp};

    const PERIOD: f64 = 14.0;
    const BASE: f64 = 100.0;

    fn at(date: &str) -> Timestamp {
        format!("{date}T00:00:00Z").parse().unwrap()
    }

    /// Chronological `(date, atr, watr)` rows.
    fn chronological() -> Vec<(Timestamp, f64, Option<f64>)> {
        PUBLISHED_AAPL
            .iter()
            .rev()
            .map(|&(date, atr, watr)| (at(date), atr, watr))
            .collect()
    }

    /// Bars whose true ranges reproduce the published ATR sequence: the
    /// seed window repeats the first ATR, and every later true range is
    /// solved from `atr_t * period - atr_{t-1} * (period - 1)`.
    fn bars() -> Vec<Observation> {
        let rows = chronological();
        let seed_end = rows[0].0;

        let bar = |date_time: Timestamp, tr: f64| {
            Observation::new(date_time)
                .with(Field::High, BASE + tr)
                .with(Field::Low, BASE)
                .with(Field::Close, BASE)
        };

        let mut bars = vec![
            Observation::new(seed_end - Days::new(14)).with(Field::Close, BASE),
        ];
        for back in (0..14).rev() {
            bars.push(bar(seed_end - Days::new(back), rows[0].1));
        }
        for pair in rows.windows(2) {
            let tr = pair[1].1 * PERIOD - pair[0].1 * (PERIOD - 1.0);
            bars.push(bar(pair[1].0, tr));
        }
        bars
    }

    #[test]
    fn published_watr_blends_current_and_previous_atr() {
        let rows = chronological();
        assert_eq!(rows[0].2, None);

        for pair in rows.windows(2) {
            let (prev_atr, (date, atr, watr)) = (pair[0].1, pair[1]);
            let expected = atr / 12.0 + 11.0 / 12.0 * prev_atr;
            assert_near(watr.unwrap(), expected, 1e-12, &format!("blend at {date}"));
        }
    }

    #[test]
    fn replaying_published_true_ranges_reproduces_table() {
        let output = Watr::calculate(&bars(), &config()).unwrap();

        assert_eq!(output.len(), PUBLISHED_AAPL.len());
        for (record, &(date, atr, watr)) in output.iter().zip(&PUBLISHED_AAPL) {
            assert_eq!(record.date_time(), at(date));
            assert_near(record.atr(), atr, 1e-10, &format!("ATR(14) at {date}"));
            match (record.watr(), watr) {
                (Some(a), Some(e)) => assert_near(a, e, 1e-10, &format!("WATR(14) at {date}")),
                (None, None) => {}
                (a, e) => panic!("WATR presence mismatch at {date}: actual={a:?}, expected={e:?}"),
            }
        }
    }
}
