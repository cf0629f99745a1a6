//! Task planning
//!
//! Turns one newly observed file into the ordered task set required to
//! deliver it: one copy into the mirrored destination tree, one upload per
//! photo service, and the final delete of the original. Planning is pure:
//! it never touches the filesystem and never fails.

use std::path::Path;

use crate::domain::{Task, TaskKind};

/// Build the task set for a single source file.
///
/// The copy destination is `dest_root` joined with the source path relative
/// to `source_root`. The album name for both uploads is the parent directory
/// of that relative path; a file sitting directly under the source root gets
/// an empty album. If the source does not start with `source_root` the source
/// path itself (minus its leading root) is used as the relative part, so
/// planning still succeeds.
///
/// The returned order is the dependency order: the first three tasks are
/// mutually independent, the delete depends on all of them.
pub fn plan(source: &Path, source_root: &Path, dest_root: &Path) -> Vec<Task> {
    let relative = source
        .strip_prefix(source_root)
        .or_else(|_| source.strip_prefix(std::path::MAIN_SEPARATOR_STR))
        .unwrap_or(source);
    let dest = dest_root.join(relative);
    let album = relative
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    vec![
        Task::new(source, TaskKind::Copy { dest }),
        Task::new(source, TaskKind::UploadGooglePhotos { album: album.clone() }),
        Task::new(source, TaskKind::UploadPhotoPrism { album }),
        Task::new(source, TaskKind::Delete),
    ]
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::TaskStatus;

    #[test]
    fn test_plan_builds_full_set_in_order() {
        let tasks = plan(
            Path::new("/src/2024/a.jpg"),
            Path::new("/src"),
            Path::new("/dst"),
        );

        assert_eq!(tasks.len(), 4);
        assert_eq!(
            tasks[0].kind,
            TaskKind::Copy {
                dest: PathBuf::from("/dst/2024/a.jpg")
            }
        );
        assert_eq!(
            tasks[1].kind,
            TaskKind::UploadGooglePhotos {
                album: "2024".to_string()
            }
        );
        assert_eq!(
            tasks[2].kind,
            TaskKind::UploadPhotoPrism {
                album: "2024".to_string()
            }
        );
        assert_eq!(tasks[3].kind, TaskKind::Delete);

        for task in &tasks {
            assert_eq!(task.source, PathBuf::from("/src/2024/a.jpg"));
            assert_eq!(task.status, TaskStatus::Pending);
            assert!(task.detail.is_empty());
        }
    }

    #[test]
    fn test_plan_is_deterministic() {
        let a = plan(
            Path::new("/src/2024/trip/b.png"),
            Path::new("/src"),
            Path::new("/dst"),
        );
        let b = plan(
            Path::new("/src/2024/trip/b.png"),
            Path::new("/src"),
            Path::new("/dst"),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_plan_nested_album_keeps_full_relative_dir() {
        let tasks = plan(
            Path::new("/src/2024/trip/b.png"),
            Path::new("/src"),
            Path::new("/dst"),
        );
        assert_eq!(
            tasks[1].kind,
            TaskKind::UploadGooglePhotos {
                album: format!("2024{}trip", std::path::MAIN_SEPARATOR)
            }
        );
    }

    #[test]
    fn test_plan_root_level_file_has_empty_album() {
        let tasks = plan(Path::new("/src/a.jpg"), Path::new("/src"), Path::new("/dst"));
        assert_eq!(
            tasks[0].kind,
            TaskKind::Copy {
                dest: PathBuf::from("/dst/a.jpg")
            }
        );
        assert_eq!(
            tasks[1].kind,
            TaskKind::UploadGooglePhotos {
                album: String::new()
            }
        );
    }

    #[test]
    fn test_plan_source_outside_root_still_plans() {
        let tasks = plan(
            Path::new("/elsewhere/a.jpg"),
            Path::new("/src"),
            Path::new("/dst"),
        );
        assert_eq!(tasks.len(), 4);
        assert_eq!(
            tasks[0].kind,
            TaskKind::Copy {
                dest: PathBuf::from("/dst/elsewhere/a.jpg")
            }
        );
    }
}
