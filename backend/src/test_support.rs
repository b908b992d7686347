//! Test utilities for the place directory crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and behind the `test-support` feature.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use place_directory::test_support::cap_fs::write_file;
    ///
    /// let path = std::env::temp_dir().join("cap-fs-write-example.json");
    /// write_file(&path, b"[]\n")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

pub mod clock {
    //! A settable clock for time-dependent rules.

    use std::sync::{Mutex, MutexGuard};

    use chrono::{DateTime, Local, TimeDelta, Utc};
    use mockable::Clock;

    /// Clock whose current instant only moves when a test says so.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{TimeDelta, Utc};
    /// use mockable::Clock;
    /// use place_directory::test_support::clock::MutableClock;
    ///
    /// let start = Utc::now();
    /// let clock = MutableClock::new(start);
    /// clock.advance(TimeDelta::days(31));
    /// assert_eq!(clock.utc(), start + TimeDelta::days(31));
    /// ```
    #[derive(Debug)]
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance(&self, delta: TimeDelta) {
            *self.lock_clock() += delta;
        }

        pub fn set(&self, now: DateTime<Utc>) {
            *self.lock_clock() = now;
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod fixtures {
    //! Builders for commonly needed domain values.

    use uuid::Uuid;

    use crate::domain::{Package, PackageDraft, Role, User, UserId, Username};

    /// A user with a fresh id.
    pub fn user_with_role(username: &str, role: Role) -> User {
        let username = match Username::new(username) {
            Ok(username) => username,
            Err(error) => panic!("invalid fixture username {username:?}: {error}"),
        };
        User::new(UserId::random(), username, role)
    }

    /// A package lasting `duration_days`.
    pub fn package(name: &str, duration_days: u32) -> Package {
        match Package::new(PackageDraft {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            description: String::new(),
            price_cents: 1_000,
            duration_days,
        }) {
            Ok(package) => package,
            Err(error) => panic!("invalid fixture package {name:?}: {error}"),
        }
    }
}
