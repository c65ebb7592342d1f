use crate::datetime::{format_appointment_time, parse_appointment_time};
use crate::error::{LabError, Result};
use crate::store::{Entity, EntityStore};
use crate::types::AppointmentStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PATIENT_PREFIX: char = 'P';
pub const APPOINTMENT_PREFIX: char = 'A';

// ---------------------------------------------------------------------------
// Patient
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    /// Free text, typically `YYYY-MM-DD`; never checked against a calendar.
    pub dob: String,
    pub contact: String,
    pub medical_history: Vec<String>,
}

impl Patient {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        dob: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dob: dob.into(),
            contact: contact.into(),
            medical_history: Vec::new(),
        }
    }

    pub fn add_medical_record(&mut self, record: impl Into<String>) {
        self.medical_history.push(record.into());
    }
}

impl Entity for Patient {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient ID: {}, Name: {}, Contact: {}",
            self.id, self.name, self.contact
        )
    }
}

// ---------------------------------------------------------------------------
// Appointment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    /// Patient this appointment was booked for. Not an owning reference.
    pub patient_id: String,
    pub doctor_name: String,
    pub date_time: NaiveDateTime,
    pub purpose: String,
    pub status: AppointmentStatus,
}

impl Entity for Appointment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment ID: {}, Patient ID: {}, Doctor: {}, Time: {}, Purpose: {}, Status: {}",
            self.id,
            self.patient_id,
            self.doctor_name,
            format_appointment_time(&self.date_time),
            self.purpose,
            self.status
        )
    }
}

// ---------------------------------------------------------------------------
// ClinicRegistry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ClinicRegistry {
    patients: EntityStore<Patient>,
    appointments: EntityStore<Appointment>,
}

impl Default for ClinicRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClinicRegistry {
    pub fn new() -> Self {
        Self {
            patients: EntityStore::new(PATIENT_PREFIX),
            appointments: EntityStore::new(APPOINTMENT_PREFIX),
        }
    }

    pub fn register_patient(
        &mut self,
        name: impl Into<String>,
        dob: impl Into<String>,
        contact: impl Into<String>,
    ) -> String {
        let id = self
            .patients
            .create(|id| Patient::new(id, name, dob, contact));
        tracing::debug!(patient = %id, "patient registered");
        id
    }

    pub fn get_patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.get(patient_id)
    }

    pub fn list_all_patients(&self) -> &[Patient] {
        self.patients.list_all()
    }

    pub fn add_medical_record(&mut self, patient_id: &str, record: impl Into<String>) -> Result<()> {
        let patient = self
            .patients
            .get_mut(patient_id)
            .ok_or_else(|| LabError::PatientNotFound(patient_id.to_string()))?;
        patient.add_medical_record(record);
        Ok(())
    }

    /// Book an appointment for an existing patient.
    ///
    /// The patient is checked before the date-time, so an unknown patient
    /// is always `PatientNotFound`. On any error no ID is consumed.
    pub fn schedule_appointment(
        &mut self,
        patient_id: &str,
        doctor_name: impl Into<String>,
        date_time: &str,
        purpose: impl Into<String>,
    ) -> Result<String> {
        if !self.patients.contains(patient_id) {
            return Err(LabError::PatientNotFound(patient_id.to_string()));
        }
        let date_time = parse_appointment_time(date_time)?;

        let id = self.appointments.create(|id| Appointment {
            id,
            patient_id: patient_id.to_string(),
            doctor_name: doctor_name.into(),
            date_time,
            purpose: purpose.into(),
            status: AppointmentStatus::Scheduled,
        });
        tracing::debug!(appointment = %id, patient = %patient_id, "appointment scheduled");
        Ok(id)
    }

    pub fn get_appointment(&self, appointment_id: &str) -> Option<&Appointment> {
        self.appointments.get(appointment_id)
    }

    /// Appointments of one patient in the order they were scheduled.
    pub fn view_patient_appointments(&self, patient_id: &str) -> Result<Vec<&Appointment>> {
        if !self.patients.contains(patient_id) {
            return Err(LabError::PatientNotFound(patient_id.to_string()));
        }
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .collect())
    }

    pub fn list_all_appointments(&self) -> &[Appointment] {
        self.appointments.list_all()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn clinic_with_patient() -> (ClinicRegistry, String) {
        let mut clinic = ClinicRegistry::new();
        let id = clinic.register_patient("Jane Doe", "1990-01-01", "555-0100");
        (clinic, id)
    }

    #[test]
    fn register_patient_assigns_ids() {
        let mut clinic = ClinicRegistry::new();
        assert_eq!(clinic.register_patient("A", "x", "1"), "P0001");
        assert_eq!(clinic.register_patient("B", "not a date", "2"), "P0002");
        assert_eq!(clinic.get_patient("P0002").unwrap().dob, "not a date");
        assert!(clinic.get_patient("P0003").is_none());
    }

    #[test]
    fn schedule_stores_parsed_time() {
        let (mut clinic, pid) = clinic_with_patient();
        let aid = clinic
            .schedule_appointment(&pid, "Smith", "2024-03-15 09:30", "checkup")
            .unwrap();
        assert_eq!(aid, "A0001");

        let appt = clinic.get_appointment(&aid).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(appt.date_time, expected);
        assert_eq!(appt.patient_id, pid);
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn bad_time_is_rejected_without_side_effects() {
        let (mut clinic, pid) = clinic_with_patient();
        let err = clinic
            .schedule_appointment(&pid, "Smith", "15/03/2024 9:30", "checkup")
            .unwrap_err();
        assert!(matches!(err, LabError::InvalidDateTime(_)));
        assert!(clinic.list_all_appointments().is_empty());

        // The failed attempt did not burn an ID.
        let aid = clinic
            .schedule_appointment(&pid, "Smith", "2024-03-15 09:30", "checkup")
            .unwrap();
        assert_eq!(aid, "A0001");
    }

    #[test]
    fn unknown_patient_wins_over_bad_time() {
        let (mut clinic, _) = clinic_with_patient();
        for when in ["2024-03-15 09:30", "garbage"] {
            let err = clinic
                .schedule_appointment("P0404", "Smith", when, "checkup")
                .unwrap_err();
            assert!(matches!(err, LabError::PatientNotFound(ref p) if p == "P0404"));
        }
        assert!(clinic.list_all_appointments().is_empty());
    }

    #[test]
    fn view_filters_by_patient_in_schedule_order() {
        let (mut clinic, jane) = clinic_with_patient();
        let john = clinic.register_patient("John Roe", "1980-05-05", "555-0199");

        let a1 = clinic.schedule_appointment(&jane, "Smith", "2024-05-01 10:00", "follow-up").unwrap();
        let a2 = clinic.schedule_appointment(&john, "Lee", "2024-01-01 08:00", "intake").unwrap();
        let a3 = clinic.schedule_appointment(&jane, "Lee", "2024-02-01 11:15", "labs").unwrap();

        let ids: Vec<&str> = clinic
            .view_patient_appointments(&jane)
            .unwrap()
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, [a1.as_str(), a3.as_str()]);

        let ids: Vec<&str> = clinic
            .view_patient_appointments(&john)
            .unwrap()
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, [a2.as_str()]);
    }

    #[test]
    fn view_distinguishes_none_from_unknown() {
        let (clinic, pid) = clinic_with_patient();
        assert!(clinic.view_patient_appointments(&pid).unwrap().is_empty());
        assert!(clinic
            .view_patient_appointments("P0002")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn medical_history_is_append_only() {
        let (mut clinic, pid) = clinic_with_patient();
        clinic.add_medical_record(&pid, "asthma").unwrap();
        clinic.add_medical_record(&pid, "penicillin allergy").unwrap();
        assert_eq!(
            clinic.get_patient(&pid).unwrap().medical_history,
            ["asthma", "penicillin allergy"]
        );
        assert!(matches!(
            clinic.add_medical_record("P0009", "x"),
            Err(LabError::PatientNotFound(_))
        ));
    }

    #[test]
    fn jane_doe_end_to_end() {
        let mut clinic = ClinicRegistry::new();
        let pid = clinic.register_patient("Jane Doe", "1990-01-01", "555-0100");
        assert_eq!(pid, "P0001");

        let first = clinic.schedule_appointment("P0001", "Smith", "2024-03-15 09:30", "checkup").unwrap();
        let second = clinic.schedule_appointment("P0001", "Smith", "2024-04-15 09:30", "review").unwrap();
        assert_eq!((first.as_str(), second.as_str()), ("A0001", "A0002"));

        let appts = clinic.view_patient_appointments("P0001").unwrap();
        assert_eq!(appts.len(), 2);
        assert_eq!(appts[0].id, "A0001");
        assert_eq!(appts[0].purpose, "checkup");
        assert_eq!(appts[1].id, "A0002");
        assert_eq!(appts[1].purpose, "review");
    }

    #[test]
    fn display_formats() {
        let (mut clinic, pid) = clinic_with_patient();
        assert_eq!(
            clinic.get_patient(&pid).unwrap().to_string(),
            "Patient ID: P0001, Name: Jane Doe, Contact: 555-0100"
        );
        let aid = clinic.schedule_appointment(&pid, "Smith", "2024-03-15 09:30", "checkup").unwrap();
        assert_eq!(
            clinic.get_appointment(&aid).unwrap().to_string(),
            "Appointment ID: A0001, Patient ID: P0001, Doctor: Smith, Time: 2024-03-15 09:30, \
             Purpose: checkup, Status: Scheduled"
        );
    }
}
