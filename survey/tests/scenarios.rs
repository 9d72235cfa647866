use geo::Coord;
use rstest::rstest;

use treatpath_survey::{
    label_points, Datum, ErrorKind, Position, RunSummary, SegmentKind, SegmentSet, Status, Survey,
    SurveyPoint, SurveyReport, TravelTimeEstimator,
};

/// Points on the x axis, 1 unit apart, `T` for treatment.
///
fn line(pattern: &str) -> Survey {
    let points = pattern
        .chars()
        .enumerate()
        .map(|(i, c)| SurveyPoint::new(Position::new(i as f64, 0., 0.), c == 'T'))
        .collect();
    Survey::new(Datum::default(), points)
}

#[test]
fn test_two_runs_on_a_line() {
    let s = line("TTTFFTTF");
    let runs = RunSummary::aggregate(s.points());

    assert_eq!(2, runs.runs.len());
    assert_eq!((0, 2, 2.), (runs.runs[0].start, runs.runs[0].end, runs.runs[0].length));
    assert_eq!((5, 6, 1.), (runs.runs[1].start, runs.runs[1].end, runs.runs[1].length));
    assert_eq!(3., runs.total_distance);

    let t = TravelTimeEstimator::default().estimate(&s, &runs);
    assert_eq!(7., t.total_distance);
    assert_eq!(4., t.non_treatment_distance);
}

#[test]
fn test_no_treatment_points() {
    let s = line("FFFFF");
    let set = SegmentSet::extract(&s);

    assert_eq!(5, set.lead_in.len());
    assert!(set.rows.is_empty());
    assert!(set.turns.is_empty());
    assert!(set.lead_out.is_empty());

    let r = SurveyReport::compute(&s, &TravelTimeEstimator::default());
    assert_eq!(0., r.times.treatment_distance);
    assert_eq!(0., r.times.treatment_minutes);
    assert!(r.times.run_minutes.is_empty());
    assert_eq!(r.times.total_distance, r.times.non_treatment_distance);
}

#[test]
fn test_datum_offset() {
    let s = Survey::new(
        Datum::new(10., 20.),
        vec![SurveyPoint::new(Position::new(1., 2., 0.), true)],
    );
    assert_eq!(Coord { x: 11., y: 22. }, s.datum().adjust(&s.points()[0].position));

    let set = SegmentSet::extract(&s);
    assert_eq!(&[Coord { x: 11., y: 22. }], set.rows.coords());
    assert_eq!(&[Coord { x: 11., y: 22. }], set.lead_out.coords());
}

#[rstest]
#[case(-1., 0.5)]
#[case(0.23, -1.)]
#[case(0., 0.5)]
fn test_negative_speed(#[case] treatment: f64, #[case] other: f64) {
    let r = TravelTimeEstimator::new(treatment, other);
    match r {
        Err(e @ Status::InvalidSpeed { .. }) => assert_eq!(ErrorKind::Configuration, e.kind()),
        _ => panic!("expected an invalid speed"),
    }
}

#[rstest]
#[case("FFTTTFFTTFF")]
#[case("TFTFTFT")]
#[case("TTTT")]
#[case("FFTFF")]
#[case("T")]
#[case("FTFFFFFTTTTFTF")]
fn test_partition_coverage(#[case] pattern: &str) {
    let s = line(pattern);
    let set = SegmentSet::extract(&s);
    let labels = label_points(s.points());

    let count = |k| labels.iter().filter(|&&l| l == k).count();

    // Every index gets exactly one label, and the labels match the segment sizes; the last
    // treatment point is both a row and the start of the lead-out.
    //
    assert_eq!(s.len(), labels.len());
    assert_eq!(set.lead_in.len(), count(SegmentKind::LeadIn));
    assert_eq!(set.rows.len(), count(SegmentKind::Rows));
    assert_eq!(set.turns.len(), count(SegmentKind::Turns));
    assert_eq!(set.lead_out.len(), count(SegmentKind::LeadOut) + 1);
    assert_eq!(
        s.len() + 1,
        set.lead_in.len() + set.rows.len() + set.turns.len() + set.lead_out.len()
    );
}

#[test]
fn test_idempotent() {
    let s = line("FFTTTFFTTFTF");
    assert_eq!(SegmentSet::extract(&s), SegmentSet::extract(&s));

    let e = TravelTimeEstimator::default();
    assert_eq!(SurveyReport::compute(&s, &e), SurveyReport::compute(&s, &e));
}

#[rstest]
#[case("")]
#[case("T")]
#[case("F")]
#[case("TFTFTFTF")]
fn test_degenerate_distances_are_zero(#[case] pattern: &str) {
    let s = line(pattern);
    let r = SurveyReport::compute(&s, &TravelTimeEstimator::default());

    assert!(r.segments.iter().all(|seg| seg.total_distance >= 0.));
    assert_eq!(0., r.runs.total_distance);
    assert!(r.runs.runs.is_empty());
}

#[test]
fn test_trailing_run_is_ignored() {
    let s = line("FTTFTTTT");
    let runs = RunSummary::aggregate(s.points());
    assert_eq!(1, runs.runs.len());
    assert_eq!(1., runs.total_distance);
}

#[test_pretty_log::test]
fn test_field_survey() -> Result<(), Status> {
    let s = Survey::load("testdata/field.json")?;
    let r = SurveyReport::compute(&s, &TravelTimeEstimator::new(1., 1.)?);

    assert_eq!(Coord { x: 100., y: 200. }, r.home);

    assert_eq!(2, r.segments.lead_in.len());
    assert_eq!(1., r.segments.lead_in.total_distance);
    assert_eq!(7, r.segments.rows.len());
    assert_eq!(8., r.segments.rows.total_distance);
    assert_eq!(2, r.segments.turns.len());
    assert_eq!(1., r.segments.turns.total_distance);
    assert_eq!(4, r.segments.lead_out.len());
    assert_eq!(3., r.segments.lead_out.total_distance);

    assert_eq!(2, r.runs.runs.len());
    assert_eq!(3., r.runs.runs[0].length);
    assert_eq!(2., r.runs.runs[1].length);
    assert_eq!(vec![0.05, 0.03], r.times.run_minutes);
    assert_eq!(13., r.times.total_distance);
    assert_eq!(5., r.times.treatment_distance);
    assert_eq!(8., r.times.non_treatment_distance);
    assert_eq!(0.08, r.times.treatment_minutes);
    assert_eq!(0.13, r.times.non_treatment_minutes);
    Ok(())
}
