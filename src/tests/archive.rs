#[cfg(test)]
mod test {
    use crate::{
        prelude::*,
        tests::toolkit::{archive_resource, data_dir, scratch_dir},
    };

    #[test]
    fn local_archive_fallback() {
        let archive = LocalArchive::new(data_dir().join("archive"));
        let mut locator = Locator::new(archive);

        let date = AlmanacDate::from_ymd(2024, 3, 1).unwrap();
        let located = locator.locate(date).unwrap();

        assert!(located.is_fallback());
        assert_eq!(located.resolution.date.to_string(), "2024-02-28");
        assert_eq!(located.resolution.day_of_year, 59);
        assert_eq!(located.attempts, 3);

        let table = located.parse().unwrap();
        assert_eq!(table.len(), 31);
        assert_eq!(table.week(), Some(254));
        assert_eq!(table.date, Some(located.resolution.date));
        assert!(table.is_clean());
    }

    #[test]
    fn local_archive_not_found() {
        let mut archive = LocalArchive::new(data_dir().join("archive"));
        assert_eq!(archive.fetch(2024, 1), Err(FetchError::NotFound));
        assert_eq!(archive.fetch(1999, 59), Err(FetchError::NotFound));

        let mut locator = Locator::new(archive);
        let date = AlmanacDate::from_ymd(2024, 3, 20).unwrap();
        match locator.locate(date) {
            Err(Error::NotFound { attempted, .. }) => assert_eq!(attempted.len(), 8),
            other => panic!("expecting not found, got {:?}", other),
        }
    }

    #[test]
    fn local_archive_transport() {
        let root = scratch_dir();
        archive_resource(&root, 2024, 60, "yumaAlmanac_2024-03-01.alm");

        // a directory is found, but cannot be read
        let blocking = root.join("2024").join("Yuma").join("061.alm");
        std::fs::create_dir_all(&blocking).unwrap();

        let mut archive = LocalArchive::new(&root);
        assert_eq!(archive.root(), root.as_path());
        match archive.fetch(2024, 61) {
            Err(FetchError::Transport(reason)) => assert!(reason.contains("061.alm")),
            other => panic!("expecting transport error, got {:?}", other),
        }

        let mut locator = Locator::new(archive);
        let date = AlmanacDate::from_ymd(2024, 3, 1).unwrap();
        match locator.locate(date) {
            Err(Error::Transport {
                candidate,
                attempts,
                ..
            }) => {
                assert_eq!(candidate, date, "must not fall back to 2024-02-29");
                assert_eq!(attempts, 3);
            },
            other => panic!("expecting transport error, got {:?}", other),
        }

        std::fs::remove_dir(&blocking).unwrap();
        let located = locator.locate(date).unwrap();
        assert_eq!(located.resolution.day_of_year, 60);
        assert_eq!(located.parse().unwrap().len(), 31);

        let _ = std::fs::remove_dir_all(&root);
    }
}
