use crate::cmd::Flow;
use crate::output::write_json;
use crate::prompt::Prompt;
use labkeep_core::clinic::ClinicRegistry;
use labkeep_core::datetime::format_appointment_time;
use std::io::{BufRead, Write};

pub struct ClinicShell<R, W> {
    clinic: ClinicRegistry,
    io: Prompt<R, W>,
    json: bool,
}

pub fn run<R: BufRead, W: Write>(input: R, out: W, json: bool) -> anyhow::Result<()> {
    ClinicShell::new(ClinicRegistry::new(), input, out, json).run()
}

impl<R: BufRead, W: Write> ClinicShell<R, W> {
    pub fn new(clinic: ClinicRegistry, input: R, out: W, json: bool) -> Self {
        Self {
            clinic,
            io: Prompt::new(input, out),
            json,
        }
    }

    pub fn registry(&self) -> &ClinicRegistry {
        &self.clinic
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.io.say("\n--- Clinic Management System ---")?;
            self.io.say("1. Register Patient")?;
            self.io.say("2. Schedule Appointment")?;
            self.io.say("3. View Patient Appointments")?;
            self.io.say("4. List All Patients")?;
            self.io.say("5. Add Medical Record")?;
            self.io.say("6. Exit")?;

            let Some(choice) = self.io.ask("Enter your choice: ")? else {
                return Ok(());
            };
            let flow = match choice.trim() {
                "1" => self.register_patient()?,
                "2" => self.schedule_appointment()?,
                "3" => self.view_appointments()?,
                "4" => self.list_patients()?,
                "5" => self.add_medical_record()?,
                "6" => {
                    self.io.say("Exiting Clinic Management System. Goodbye!")?;
                    Flow::Quit
                }
                _ => {
                    self.io.say("Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn register_patient(&mut self) -> anyhow::Result<Flow> {
        let Some(name) = self.io.ask("Enter patient name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(dob) = self.io.ask("Enter DOB (YYYY-MM-DD): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(contact) = self.io.ask("Enter contact number: ")? else {
            return Ok(Flow::Quit);
        };
        let id = self.clinic.register_patient(name.as_str(), dob, contact);
        self.io.say(format!("Patient {name} registered with ID: {id}"))?;
        Ok(Flow::Continue)
    }

    fn schedule_appointment(&mut self) -> anyhow::Result<Flow> {
        let Some(patient_id) = self.io.ask("Enter patient ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(doctor) = self.io.ask("Enter doctor's name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(when) = self.io.ask("Enter date and time (YYYY-MM-DD HH:MM): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(purpose) = self.io.ask("Enter purpose of appointment: ")? else {
            return Ok(Flow::Quit);
        };

        let patient_id = patient_id.trim();
        match self
            .clinic
            .schedule_appointment(patient_id, doctor.as_str(), when.trim(), purpose)
        {
            Ok(id) => {
                let patient_name = self
                    .clinic
                    .get_patient(patient_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                let when = self
                    .clinic
                    .get_appointment(&id)
                    .map(|a| format_appointment_time(&a.date_time))
                    .unwrap_or_default();
                self.io.say(format!(
                    "Appointment {id} scheduled for {patient_name} with Dr. {doctor} on {when}"
                ))?;
            }
            Err(e) => self.io.say(format!("Error: {e}"))?,
        }
        Ok(Flow::Continue)
    }

    fn view_appointments(&mut self) -> anyhow::Result<Flow> {
        let Some(patient_id) = self.io.ask("Enter patient ID: ")? else {
            return Ok(Flow::Quit);
        };
        let patient_id = patient_id.trim();
        let appointments = match self.clinic.view_patient_appointments(patient_id) {
            Ok(appointments) => appointments,
            Err(e) => {
                self.io.say(format!("Error: {e}"))?;
                return Ok(Flow::Continue);
            }
        };
        if self.json {
            write_json(&mut self.io.out, &appointments)?;
            return Ok(Flow::Continue);
        }

        let name = self
            .clinic
            .get_patient(patient_id)
            .map(|p| p.name.as_str())
            .unwrap_or_default();
        self.io.say(format!("\n--- Appointments for {name} ---"))?;
        if appointments.is_empty() {
            self.io.say("No appointments found for this patient.")?;
            return Ok(Flow::Continue);
        }
        for appointment in appointments {
            self.io.say(appointment.to_string())?;
        }
        Ok(Flow::Continue)
    }

    fn list_patients(&mut self) -> anyhow::Result<Flow> {
        let patients = self.clinic.list_all_patients();
        if self.json {
            write_json(&mut self.io.out, &patients)?;
            return Ok(Flow::Continue);
        }

        self.io.say("\n--- All Registered Patients ---")?;
        if patients.is_empty() {
            self.io.say("No patients registered yet.")?;
            return Ok(Flow::Continue);
        }
        for patient in patients {
            self.io.say(patient.to_string())?;
        }
        Ok(Flow::Continue)
    }

    fn add_medical_record(&mut self) -> anyhow::Result<Flow> {
        let Some(patient_id) = self.io.ask("Enter patient ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(record) = self.io.ask("Enter medical record entry: ")? else {
            return Ok(Flow::Quit);
        };
        let patient_id = patient_id.trim();
        match self.clinic.add_medical_record(patient_id, record) {
            Ok(()) => {
                let count = self
                    .clinic
                    .get_patient(patient_id)
                    .map(|p| p.medical_history.len())
                    .unwrap_or_default();
                self.io
                    .say(format!("Medical record added for {patient_id} ({count} on file)"))?;
            }
            Err(e) => self.io.say(format!("Error: {e}"))?,
        }
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
