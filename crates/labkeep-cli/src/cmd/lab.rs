use crate::cmd::Flow;
use crate::output::{format_duration, write_json, write_table};
use crate::prompt::{parse_parameters, Prompt};
use labkeep_core::config::RunnerConfig;
use labkeep_core::lab::{format_metrics, format_parameters, ProjectRegistry};
use std::io::{BufRead, Write};

/// Interactive front end for a [`ProjectRegistry`].
pub struct LabShell<R, W> {
    lab: ProjectRegistry,
    io: Prompt<R, W>,
    json: bool,
}

pub fn run<R: BufRead, W: Write>(
    input: R,
    out: W,
    runner: RunnerConfig,
    json: bool,
) -> anyhow::Result<()> {
    LabShell::new(ProjectRegistry::new(runner), input, out, json).run()
}

impl<R: BufRead, W: Write> LabShell<R, W> {
    pub fn new(lab: ProjectRegistry, input: R, out: W, json: bool) -> Self {
        Self {
            lab,
            io: Prompt::new(input, out),
            json,
        }
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.lab
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.io.say("\n--- AI Lab Platform ---")?;
            self.io.say("1. Create Project")?;
            self.io.say("2. List All Projects")?;
            self.io.say("3. Select Project and Manage Experiments")?;
            self.io.say("4. Exit")?;

            let Some(choice) = self.io.ask("Enter your choice: ")? else {
                return Ok(());
            };
            let flow = match choice.trim() {
                "1" => self.create_project()?,
                "2" => self.list_projects()?,
                "3" => self.manage_project()?,
                "4" => {
                    self.io.say("Exiting AI Lab Platform. Goodbye!")?;
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

    // -----------------------------------------------------------------------
    // Main menu
    // -----------------------------------------------------------------------

    fn create_project(&mut self) -> anyhow::Result<Flow> {
        let Some(name) = self.io.ask("Enter project name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(description) = self.io.ask("Enter project description: ")? else {
            return Ok(Flow::Quit);
        };
        let id = self.lab.create_project(name.as_str(), description);
        self.io.say(format!("Project '{name}' created with ID: {id}"))?;
        Ok(Flow::Continue)
    }

    fn list_projects(&mut self) -> anyhow::Result<Flow> {
        let projects = self.lab.list_all_projects();
        if self.json {
            write_json(&mut self.io.out, &projects)?;
            return Ok(Flow::Continue);
        }

        self.io.say("\n--- All AI Projects ---")?;
        if projects.is_empty() {
            self.io.say("No projects created yet.")?;
            return Ok(Flow::Continue);
        }
        let rows = projects
            .iter()
            .map(|p| {
                vec![
                    p.id.clone(),
                    p.name.clone(),
                    p.description.clone(),
                    p.experiments.len().to_string(),
                ]
            })
            .collect();
        write_table(&mut self.io.out, &["ID", "NAME", "DESCRIPTION", "EXPERIMENTS"], rows)?;
        Ok(Flow::Continue)
    }

    fn manage_project(&mut self) -> anyhow::Result<Flow> {
        let Some(project_id) = self.io.ask("Enter Project ID to manage: ")? else {
            return Ok(Flow::Quit);
        };
        let project_id = project_id.trim();
        let Some(project) = self.lab.get_project(project_id) else {
            self.io.say("Project not found.")?;
            return Ok(Flow::Continue);
        };
        let (project_id, project_name) = (project.id.clone(), project.name.clone());
        self.io.say(project.to_string())?;

        loop {
            self.io.say(format!("\n--- Managing Project: '{project_name}' ---"))?;
            self.io.say("1. Create New Experiment")?;
            self.io.say("2. List Experiments in this Project")?;
            self.io.say("3. Run an Experiment")?;
            self.io.say("4. Back to Main Menu")?;

            let Some(choice) = self.io.ask("Enter your choice: ")? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice.trim() {
                "1" => self.create_experiment(&project_id)?,
                "2" => self.list_experiments(&project_id)?,
                "3" => self.run_experiment(&project_id)?,
                "4" => {
                    self.io
                        .say(format!("Returning to main menu from project '{project_name}'."))?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    self.io.say("Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Project menu
    // -----------------------------------------------------------------------

    fn create_experiment(&mut self, project_id: &str) -> anyhow::Result<Flow> {
        let Some(name) = self.io.ask("Enter experiment name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(model_type) = self
            .io
            .ask("Enter model type (e.g., classification, regression): ")?
        else {
            return Ok(Flow::Quit);
        };
        let Some(dataset) = self.io.ask("Enter dataset name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(params) = self
            .io
            .ask("Enter parameters (e.g., learning_rate=0.01, epochs=10): ")?
        else {
            return Ok(Flow::Quit);
        };

        let parameters = parse_parameters(&params);
        match self.lab.create_experiment(
            project_id,
            name.as_str(),
            model_type.trim(),
            dataset,
            parameters,
        ) {
            Ok(id) => {
                let project_name = self
                    .lab
                    .get_project(project_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                self.io.say(format!(
                    "Experiment '{name}' created in project '{project_name}' with ID: {id}"
                ))?;
            }
            Err(e) => self.io.say(format!("Error: {e}"))?,
        }
        Ok(Flow::Continue)
    }

    fn list_experiments(&mut self, project_id: &str) -> anyhow::Result<Flow> {
        let Some(project) = self.lab.get_project(project_id) else {
            self.io.say(format!("Error: project not found: {project_id}"))?;
            return Ok(Flow::Continue);
        };
        let experiments = project.list_experiments();
        if self.json {
            write_json(&mut self.io.out, &experiments)?;
            return Ok(Flow::Continue);
        }

        if experiments.is_empty() {
            self.io
                .say(format!("No experiments found for project '{}'.", project.name))?;
            return Ok(Flow::Continue);
        }
        self.io.say(format!(
            "\n--- Experiments in Project '{}' (ID: {}) ---",
            project.name, project.id
        ))?;
        for exp in experiments {
            self.io.say(exp.to_string())?;
        }
        Ok(Flow::Continue)
    }

    fn run_experiment(&mut self, project_id: &str) -> anyhow::Result<Flow> {
        let Some(experiment_id) = self.io.ask("Enter Experiment ID to run: ")? else {
            return Ok(Flow::Quit);
        };
        let experiment_id = experiment_id.trim();

        let header = match self.lab.get_experiment(project_id, experiment_id) {
            Ok(exp) => [
                format!("--- Running Experiment '{}' (ID: {}) ---", exp.name, exp.id),
                format!("Model Type: {}, Dataset: {}", exp.model_type, exp.dataset_name),
                format!("Parameters: {}", format_parameters(&exp.parameters)),
            ],
            Err(e) => {
                self.io.say(format!("Error: {e}"))?;
                return Ok(Flow::Continue);
            }
        };
        for line in header {
            self.io.say(line)?;
        }

        let exp = match self.lab.run_experiment(project_id, experiment_id) {
            Ok(exp) => exp,
            Err(e) => {
                self.io.say(format!("Error: {e}"))?;
                return Ok(Flow::Continue);
            }
        };
        let lines = [
            format!(
                "Experiment '{}' Completed. Results: {}",
                exp.name,
                format_metrics(&exp.metrics)
            ),
            format!(
                "Duration: {}",
                exp.duration().map(format_duration).unwrap_or_default()
            ),
        ];
        for line in lines {
            self.io.say(line)?;
        }
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
