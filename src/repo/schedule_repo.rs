use anyhow::Result;
use tracing::{debug, info, instrument};

use super::document;
use crate::dto::{ScheduleSlot, UpdateClassSchedule};
use crate::models::ClassSchedule;
use crate::store::DocumentStore;

/// Adds a class slot to a student's weekly schedule
///
/// Returns the new slot id, or None when the student does not exist. Slot
/// bounds (day, time format, duration) are validated at the input layer, not
/// here.
#[instrument(skip(store, slot), fields(student_id = %student_id, subject = %slot.subject))]
pub fn create_class_schedule(
    store: &dyn DocumentStore,
    student_id: &str,
    slot: ScheduleSlot,
) -> Result<Option<String>> {
    debug!("Creating class slot");

    let mut doc = document::load(store)?;
    let Some(student) = doc.students.iter_mut().find(|s| s.id == student_id) else {
        debug!("Student not found");
        return Ok(None);
    };

    let entry = ClassSchedule::new(
        student_id.to_string(),
        slot.day_of_week,
        slot.time,
        slot.duration,
        slot.subject,
        slot.is_active,
    );
    let slot_id = entry.id.clone();
    student.class_schedule.push(entry);

    document::persist(store, &mut doc)?;
    info!("Created class slot {} for student {}", slot_id, student_id);
    Ok(Some(slot_id))
}

/// Applies a patch to a single class slot
#[instrument(skip(store, patch), fields(schedule_id = %schedule_id))]
pub fn update_class_schedule(
    store: &dyn DocumentStore,
    schedule_id: &str,
    patch: UpdateClassSchedule,
) -> Result<bool> {
    debug!("Updating class slot");

    let mut doc = document::load(store)?;
    let Some(slot) = doc
        .students
        .iter_mut()
        .flat_map(|s| s.class_schedule.iter_mut())
        .find(|c| c.id == schedule_id)
    else {
        debug!("Class slot not found");
        return Ok(false);
    };

    if let Some(day_of_week) = patch.day_of_week {
        slot.day_of_week = day_of_week;
    }
    if let Some(time) = patch.time {
        slot.time = time;
    }
    if let Some(duration) = patch.duration {
        slot.duration = duration;
    }
    if let Some(subject) = patch.subject {
        slot.subject = subject;
    }
    if let Some(is_active) = patch.is_active {
        slot.is_active = is_active;
    }

    document::persist(store, &mut doc)?;
    info!("Updated class slot {}", schedule_id);
    Ok(true)
}

/// Replaces a student's entire weekly schedule
///
/// Every slot gets a freshly generated id; ids of the replaced slots become
/// invalid for any caller still holding them.
#[instrument(skip(store, slots), fields(student_id = %student_id, slots = slots.len()))]
pub fn replace_student_schedule(
    store: &dyn DocumentStore,
    student_id: &str,
    slots: Vec<ScheduleSlot>,
) -> Result<bool> {
    debug!("Replacing student schedule");

    let mut doc = document::load(store)?;
    let Some(student) = doc.students.iter_mut().find(|s| s.id == student_id) else {
        debug!("Student not found");
        return Ok(false);
    };

    student.class_schedule = slots
        .into_iter()
        .map(|slot| {
            ClassSchedule::new(
                student_id.to_string(),
                slot.day_of_week,
                slot.time,
                slot.duration,
                slot.subject,
                slot.is_active,
            )
        })
        .collect();

    document::persist(store, &mut doc)?;
    info!("Replaced schedule for student {}", student_id);
    Ok(true)
}

/// Deletes a class slot by id
#[instrument(skip(store), fields(schedule_id = %schedule_id))]
pub fn delete_class_schedule(store: &dyn DocumentStore, schedule_id: &str) -> Result<bool> {
    debug!("Deleting class slot");

    let mut doc = document::load(store)?;
    let mut found = false;
    for student in doc.students.iter_mut() {
        let before = student.class_schedule.len();
        student.class_schedule.retain(|c| c.id != schedule_id);
        if student.class_schedule.len() != before {
            found = true;
            break;
        }
    }

    if !found {
        debug!("Class slot not found");
        return Ok(false);
    }

    document::persist(store, &mut doc)?;
    info!("Deleted class slot {}", schedule_id);
    Ok(true)
}

/// Returns a student's schedule; empty when the student is unknown
#[instrument(skip(store), fields(student_id = %student_id))]
pub fn get_student_class_schedule(
    store: &dyn DocumentStore,
    student_id: &str,
) -> Result<Vec<ClassSchedule>> {
    let students = document::load(store)?.students;
    Ok(students
        .into_iter()
        .find(|s| s.id == student_id)
        .map(|s| s.class_schedule)
        .unwrap_or_default())
}
