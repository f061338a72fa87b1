//! End-to-end submission tests: assemble forms, validate posted data, and
//! check the records one submission produces.

use chrono::Utc;
use survey_collect::geo::{Candidate, GeoLookup, Geocoder};
use survey_collect::{
    AnswerType, AnswerValue, EmbedProvider, FormData, Question, Runtime, SubmissionContext,
    SubmissionOutcome, SubmissionSource, Survey, SurveyConfig, UploadedFile, Validated,
    forms_for_survey,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn context() -> SubmissionContext {
    SubmissionContext {
        submission_id: 1,
        submitted_at: Utc::now(),
        ip_address: None,
        user_id: None,
        session_key: "session".to_string(),
    }
}

/// A 10x20 GIF; only the header matters for dimension extraction.
fn gif_bytes() -> Vec<u8> {
    let mut bytes = b"GIF89a".to_vec();
    bytes.extend_from_slice(&[10, 0, 20, 0]);
    bytes.extend_from_slice(&[0x80, 0, 0]);
    bytes
}

#[test]
fn boolean_answer_is_never_required() {
    let survey = Survey::new(1, "bool").with_question(
        Question::new(2, 1, "Subscribe?", AnswerType::Bool).required(),
    );
    let data = FormData::new();
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    assert!(!forms.answers[0].required());

    let validated = forms.answers[0].validate(&runtime).unwrap();
    assert_eq!(validated, Validated::Value(AnswerValue::Bool(false)));
}

#[test]
fn required_select_with_no_key_is_an_error() {
    let survey = Survey::new(1, "select").with_question(
        Question::new(2, 1, "Favorite color?", AnswerType::Select)
            .required()
            .with_options(["red", "blue"]),
    );
    let data = FormData::new();
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    let errors = forms.answers[0].validate(&runtime).unwrap_err();
    assert_eq!(errors[0].message(), "This field is required.");
}

#[test]
fn optional_select_gets_a_blank_entry_but_checkboxes_do_not() {
    let select = Question::new(2, 1, "Color?", AnswerType::Select).with_options(["red", "blue"]);
    let checkbox =
        Question::new(3, 1, "Colors?", AnswerType::BoolList).with_options(["red", "blue"]);
    let survey = Survey::new(1, "choices")
        .with_question(select)
        .with_question(checkbox);

    let forms = forms_for_survey(&survey, SubmissionSource::Preview, "", None);

    let select_choices = forms.answers[0].choice_options().unwrap();
    assert_eq!(select_choices.len(), 3);
    assert_eq!(select_choices[0].key, "");
    assert_eq!(select_choices[0].display, "---------");

    let checkbox_choices = forms.answers[1].choice_options().unwrap();
    assert_eq!(checkbox_choices.len(), 2);
}

#[test]
fn option_keys_are_sanitized_but_display_keeps_markup() {
    let survey = Survey::new(1, "markup").with_question(
        Question::new(2, 1, "Pick one", AnswerType::Choice)
            .required()
            .with_options(["<b>He said \"hi\" &amp; left</b>"]),
    );
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let forms = forms_for_survey(&survey, SubmissionSource::Preview, "", None);
    let choices = forms.answers[0].choice_options().unwrap();
    assert_eq!(choices[0].key, "He said 'hi' & left");
    assert_eq!(choices[0].display, "<b>He said \"hi\" &amp; left</b>");

    // The sanitized key is what posts back and validates.
    let data = FormData::new().with_value("1_2-answer", "He said 'hi' & left");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    let validated = forms.answers[0].validate(&runtime).unwrap();
    assert_eq!(
        validated,
        Validated::Keys(vec!["He said 'hi' & left".to_string()])
    );
}

#[test]
fn checkbox_group_saves_one_answer_per_key() {
    let survey = Survey::new(1, "multi").with_question(
        Question::new(2, 1, "Colors?", AnswerType::BoolList)
            .required()
            .with_options(["red", "blue", "green"]),
    );
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new()
        .with_value("1_2-answer", "red")
        .with_value("1_2-answer", "green");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

    let outcome = forms.save_all(&runtime, &context()).unwrap();
    assert_eq!(outcome.answers.len(), 2);
    assert_eq!(outcome.answers[0].value, AnswerValue::Text("red".into()));
    assert_eq!(outcome.answers[1].value, AnswerValue::Text("green".into()));
}

#[test]
fn ranked_choice_combines_into_one_answer() {
    let survey = Survey::new(1, "ranked").with_question(
        Question::new(2, 1, "Rank your top 3", AnswerType::Ranked)
            .with_options(["a", "b", "c", "d"]),
    );
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new()
        .with_value("1_2-answer_0", "c")
        .with_value("1_2-answer_1", "a")
        .with_value("1_2-answer_2", "d");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

    let outcome = forms.save_all(&runtime, &context()).unwrap();
    assert_eq!(outcome.answers.len(), 1);
    assert_eq!(outcome.answers[0].value, AnswerValue::Text("c,a,d".into()));
}

#[test]
fn ranked_choice_allows_empty_positions() {
    let survey = Survey::new(1, "ranked").with_question(
        Question::new(2, 1, "Rank your top 3", AnswerType::Ranked).with_options(["a", "b"]),
    );
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new().with_value("1_2-answer_1", "b");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

    let validated = forms.answers[0].validate(&runtime).unwrap();
    assert_eq!(validated, Validated::Value(AnswerValue::Text(",b,".into())));
}

#[test]
fn video_url_matches_pattern_and_keeps_the_matched_prefix() {
    let survey = Survey::new(1, "video")
        .with_question(Question::new(2, 1, "Video?", AnswerType::Video).required());
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new().with_value(
        "1_2-answer",
        "http://www.youtube.com/watch?v=abc123&feature=related",
    );
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    let validated = forms.answers[0].validate(&runtime).unwrap();
    assert_eq!(
        validated,
        Validated::Value(AnswerValue::Text(
            "http://www.youtube.com/watch?v=abc123".into()
        ))
    );

    let data = FormData::new().with_value("1_2-answer", "http://vimeo.com/123");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    let errors = forms.answers[0].validate(&runtime).unwrap_err();
    assert_eq!(errors[0].message(), "Unknown video url format.");
}

struct ExpandsEverything;

impl EmbedProvider for ExpandsEverything {
    fn expand(&self, url: &str) -> anyhow::Result<Option<String>> {
        Ok(Some(format!("<iframe src=\"{url}\"></iframe>")))
    }
}

struct ExpandsNothing;

impl EmbedProvider for ExpandsNothing {
    fn expand(&self, _url: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

#[test]
fn embed_provider_overrides_the_pattern_list() {
    let survey = Survey::new(1, "video")
        .with_question(Question::new(2, 1, "Video?", AnswerType::Video).required());
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();

    // Accepted by the provider even though no pattern matches.
    let data = FormData::new().with_value("1_2-answer", "http://vimeo.com/123");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

    let runtime = Runtime::new(&config, &geo).with_embed(&ExpandsEverything);
    let validated = forms.answers[0].validate(&runtime).unwrap();
    assert_eq!(
        validated,
        Validated::Value(AnswerValue::Text("http://vimeo.com/123".into()))
    );

    // Rejected when the provider cannot expand, patterns notwithstanding.
    let data = FormData::new().with_value("1_2-answer", "http://www.youtube.com/watch?v=abc");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    let runtime = Runtime::new(&config, &geo).with_embed(&ExpandsNothing);
    let errors = forms.answers[0].validate(&runtime).unwrap_err();
    assert_eq!(errors[0].message(), "Unknown video url format.");
}

struct BrokenGeocoder;

impl Geocoder for BrokenGeocoder {
    fn geocode(&self, _location: &str) -> anyhow::Result<Vec<Candidate>> {
        anyhow::bail!("geocoder down")
    }
}

#[test]
fn geocoding_failure_never_blocks_the_location_save() {
    init_logging();
    let survey = Survey::new(1, "location")
        .with_question(Question::new(2, 1, "Where are you?", AnswerType::Location).required());
    let config = SurveyConfig::default();
    let geo = GeoLookup::new(Box::new(BrokenGeocoder));
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new().with_value("1_2-answer", "Springfield");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

    let outcome = forms.save_all(&runtime, &context()).unwrap();
    let location = outcome.answers[0].value.as_location().unwrap();
    assert_eq!(location.text, "Springfield");
    assert_eq!(location.latitude, None);
    assert_eq!(location.longitude, None);
}

#[test]
fn working_geocoder_fills_in_coordinates() {
    struct OnePlace;
    impl Geocoder for OnePlace {
        fn geocode(&self, _location: &str) -> anyhow::Result<Vec<Candidate>> {
            Ok(vec![Candidate::new("Springfield, IL", 39.8, -89.6)])
        }
    }

    let survey = Survey::new(1, "location")
        .with_question(Question::new(2, 1, "Where are you?", AnswerType::Location).required());
    let config = SurveyConfig::default();
    let geo = GeoLookup::new(Box::new(OnePlace));
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new().with_value("1_2-answer", "Springfield");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

    let outcome = forms.save_all(&runtime, &context()).unwrap();
    let location = outcome.answers[0].value.as_location().unwrap();
    assert_eq!(location.latitude, Some(39.8));
    assert_eq!(location.longitude, Some(-89.6));
}

#[test]
fn photo_upload_extracts_dimensions() {
    let survey = Survey::new(1, "photo")
        .with_question(Question::new(2, 1, "A picture of it", AnswerType::Photo).required());
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let data =
        FormData::new().with_file("1_2-answer", UploadedFile::new("cat.gif", gif_bytes()));
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

    let outcome = forms.save_all(&runtime, &context()).unwrap();
    let image = outcome.answers[0].value.as_photo().unwrap();
    assert_eq!((image.width, image.height), (10, 20));
    assert_eq!(image.filename, "cat.gif");
    assert!(!image.is_synced());
}

#[test]
fn unreadable_upload_is_a_field_error() {
    let survey = Survey::new(1, "photo")
        .with_question(Question::new(2, 1, "A picture of it", AnswerType::Photo).required());
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new()
        .with_file("1_2-answer", UploadedFile::new("junk.psd", vec![0, 1, 2, 3]));
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

    let errors = forms.answers[0].validate(&runtime).unwrap_err();
    assert!(errors[0].message().contains(".jpeg, .png, or"));
}

#[test]
fn date_and_email_answers_coerce() {
    let survey = Survey::new(1, "scalars")
        .with_question(Question::new(2, 1, "When?", AnswerType::Date).with_order(1))
        .with_question(Question::new(3, 1, "Email?", AnswerType::Email).with_order(2));
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new()
        .with_value("1_2-answer", "2026-08-24")
        .with_value("1_3-answer", "alice@example.com");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    let outcome = forms.save_all(&runtime, &context()).unwrap();

    assert!(outcome.answers[0].value.as_date().is_some());
    assert_eq!(outcome.answers[1].value.as_text(), Some("alice@example.com"));

    let data = FormData::new()
        .with_value("1_2-answer", "yesterday")
        .with_value("1_3-answer", "not-an-email");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    let errors = forms.save_all(&runtime, &context()).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors["1_2"][0].message(), "Enter a valid date.");
    assert_eq!(errors["1_3"][0].message(), "Enter a valid email address.");
}

#[test]
fn email_domain_labels_must_be_nonempty() {
    let survey = Survey::new(1, "email")
        .with_question(Question::new(2, 1, "Email?", AnswerType::Email).required());
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    for address in ["a@b..c", "a@example.com.", "a@.example.com", "a@nodot"] {
        let data = FormData::new().with_value("1_2-answer", address);
        let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
        let errors = forms.answers[0].validate(&runtime).unwrap_err();
        assert_eq!(errors[0].message(), "Enter a valid email address.", "{address}");
    }

    let data = FormData::new().with_value("1_2-answer", "a@mail.example.co.uk");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    assert!(forms.answers[0].validate(&runtime).is_ok());
}

#[test]
fn saved_records_round_trip_through_json() {
    let survey = Survey::new(1, "archive")
        .with_question(
            Question::new(2, 1, "Name?", AnswerType::Char)
                .with_order(1)
                .required(),
        )
        .with_question(Question::new(3, 1, "When?", AnswerType::Date).with_order(2));
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new()
        .with_value("1_2-answer", "Alice")
        .with_value("1_3-answer", "2026-08-24");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);
    let outcome = forms.save_all(&runtime, &context()).unwrap();

    let json = serde_json::to_string(&outcome).unwrap();
    let restored: SubmissionOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, outcome);
}

#[test]
fn moderated_surveys_start_submissions_hidden() {
    let mut survey = Survey::new(1, "moderated")
        .with_question(Question::new(2, 1, "Name?", AnswerType::Char));
    survey.moderate_submissions = true;
    let config = SurveyConfig::default();
    let geo = GeoLookup::disabled();
    let runtime = Runtime::new(&config, &geo);

    let data = FormData::new().with_value("1_2-answer", "Alice");
    let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "session", None);

    let outcome = forms.save_all(&runtime, &context()).unwrap();
    assert!(!outcome.submission.is_public);
    assert!(!outcome.submission.featured);
    assert_eq!(outcome.submission.session_key, "session");
}
