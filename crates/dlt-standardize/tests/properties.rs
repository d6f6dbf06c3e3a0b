//! Property tests for record completion.

use std::cell::Cell;

use dlt_model::{CallerArguments, ClientId, FieldKey, MetadataRecord, Modality, Mrn, UNKNOWN};
use dlt_standardize::{HashError, MetadataCompleter, PatientHasher, Sha256PatientHasher};
use proptest::prelude::*;
use proptest::test_runner::Config;

/// Counts calls and delegates to the SHA-256 hasher.
#[derive(Default)]
struct CountingHasher {
    calls: Cell<usize>,
    inner: Sha256PatientHasher,
}

impl PatientHasher for CountingHasher {
    fn hash(&self, client_id: &ClientId, mrns: &[&str]) -> Result<Vec<String>, HashError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.hash(client_id, mrns)
    }
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _/-]{1,16}"
}

fn record_strategy() -> impl Strategy<Value = MetadataRecord> {
    let field = prop::sample::select(FieldKey::ALL.to_vec());
    (
        prop::collection::vec((field, value_strategy()), 0..9),
        prop::collection::btree_map("[a-z]{1,8}", value_strategy(), 0..3),
    )
        .prop_map(|(known, extra)| {
            let mut record = MetadataRecord::new();
            for (key, value) in known {
                record.set(key, value);
            }
            for (name, value) in extra {
                record.insert(name, value);
            }
            record
        })
}

fn mrn_strategy() -> impl Strategy<Value = Mrn> {
    prop_oneof![
        Just(Mrn::Unknown),
        "[A-Za-z0-9-]{1,12}".prop_map(|value| Mrn::parse(&value).expect("valid mrn")),
    ]
}

fn arguments_strategy() -> impl Strategy<Value = CallerArguments> {
    (
        "[a-z][a-z0-9-]{0,10}",
        prop::option::of("[A-Z]{2,8}"),
        mrn_strategy(),
    )
        .prop_map(|(client_id, modality, mrn)| {
            let arguments = CallerArguments::new(ClientId::new(client_id).expect("client id"), mrn);
            match modality {
                Some(modality) => {
                    arguments.with_modality(Modality::new(modality).expect("modality"))
                }
                None => arguments,
            }
        })
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn second_pass_changes_nothing(record in record_strategy(), arguments in arguments_strategy()) {
        let completer = MetadataCompleter::new(Sha256PatientHasher::new());
        let once = completer.standardize(record, &arguments).expect("first pass");
        let twice = completer.standardize(once.clone(), &arguments).expect("second pass");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn present_fields_are_never_overwritten(record in record_strategy(), arguments in arguments_strategy()) {
        let completer = MetadataCompleter::new(Sha256PatientHasher::new());
        let out = completer.standardize(record.clone(), &arguments).expect("standardize");
        for (name, value) in record.iter() {
            prop_assert_eq!(out.get_by_name(name), Some(value));
        }
    }

    #[test]
    fn required_and_defaulted_fields_are_present(record in record_strategy(), arguments in arguments_strategy()) {
        let completer = MetadataCompleter::new(Sha256PatientHasher::new());
        let out = completer.standardize(record, &arguments).expect("standardize");
        prop_assert!(out.contains(FieldKey::ClientId));
        prop_assert!(out.contains(FieldKey::PatientId));
        for key in FieldKey::DEFAULTED {
            prop_assert!(out.contains(key));
        }
    }

    #[test]
    fn unknown_mrn_never_reaches_hasher(record in record_strategy(), arguments in arguments_strategy()) {
        prop_assume!(arguments.mrn().is_unknown());
        let had_patient_id = record.contains(FieldKey::PatientId);
        let completer = MetadataCompleter::new(CountingHasher::default());
        let out = completer.standardize(record, &arguments).expect("standardize");
        prop_assert_eq!(completer.hasher().calls.get(), 0);
        if !had_patient_id {
            prop_assert_eq!(out.get(FieldKey::PatientId), Some(UNKNOWN));
        }
    }

    #[test]
    fn hasher_called_at_most_once(record in record_strategy(), arguments in arguments_strategy()) {
        let needs_hash = !record.contains(FieldKey::PatientId) && !arguments.mrn().is_unknown();
        let completer = MetadataCompleter::new(CountingHasher::default());
        completer.standardize(record, &arguments).expect("standardize");
        prop_assert_eq!(completer.hasher().calls.get(), usize::from(needs_hash));
    }

    #[test]
    fn patient_id_is_deterministic(mrn in "[A-Za-z0-9-]{1,12}", client_id in "[a-z]{1,8}") {
        prop_assume!(mrn != UNKNOWN);
        let arguments = CallerArguments::new(
            ClientId::new(client_id).expect("client id"),
            Mrn::parse(&mrn).expect("mrn"),
        );
        let first = MetadataCompleter::new(Sha256PatientHasher::new())
            .standardize(MetadataRecord::new(), &arguments)
            .expect("first");
        let second = MetadataCompleter::new(Sha256PatientHasher::new())
            .standardize(MetadataRecord::new(), &arguments)
            .expect("second");
        prop_assert_eq!(first.get(FieldKey::PatientId), second.get(FieldKey::PatientId));
        prop_assert_ne!(first.get(FieldKey::PatientId), Some(UNKNOWN));
    }
}
