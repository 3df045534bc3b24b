use proptest::prelude::*;
use prov_fs::{Digest, NormalizedPath, compute_content_checksum};

proptest! {
    #[test]
    fn test_normalization_removes_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));

        let roundtripped = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, roundtripped);
    }

    #[test]
    fn test_join_appends_file_name(base in "(/[a-z]{1,8}){0,4}/?", name in "[a-zA-Z0-9._-]{1,16}") {
        prop_assume!(name != "." && name != "..");
        let joined = NormalizedPath::new(&base).join(&name);
        prop_assert_eq!(joined.file_name(), Some(name.as_str()));
        prop_assert!(!joined.as_str().contains("//"));
    }

    #[test]
    fn test_content_checksum_parses_back_from_hex(content in proptest::collection::vec(any::<u8>(), 0..256)) {
        let digest = compute_content_checksum(&content);
        let hex = digest.as_str().trim_start_matches("sha256:");
        prop_assert_eq!(Digest::from_hex(hex), Some(digest.clone()));
    }
}
