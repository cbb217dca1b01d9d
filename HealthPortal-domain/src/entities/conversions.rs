//! Conversion functions between domain entities and data models.
//!
//! Functions follow the pattern `convert_to_[target_layer]_[model_name]`.

use health_portal_data::models as data;

use super::{
    CreateCycleRequest, CreateGoalRequest, CreateInteractionRequest, CreateLabResultRequest,
    CreateReminderRequest, CreateSupplementRequest, Cycle, Goal, Interaction, LabResult, Profile,
    Reminder, Supplement, UpdateCycleRequest, UpdateGoalRequest, UpdateInteractionRequest,
    UpdateLabResultRequest, UpdateProfileRequest, UpdateReminderRequest, UpdateSupplementRequest,
};

pub fn convert_to_domain_supplement(row: data::Supplement) -> Supplement {
    Supplement {
        id: row.id,
        user_id: row.user_id,
        name: row.name,
        dose: row.dose,
        time_of_day: row.time_of_day,
        category: row.category,
        mechanism: row.mechanism,
        target: row.target,
        status: row.status,
        evidence_level: row.evidence_level,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
        removed_at: row.removed_at,
    }
}

pub fn convert_to_data_new_supplement(request: CreateSupplementRequest) -> data::NewSupplement {
    data::NewSupplement {
        name: request.name.trim().to_string(),
        dose: request.dose,
        time_of_day: request.time_of_day,
        category: request.category,
        mechanism: request.mechanism,
        target: request.target,
        evidence_level: request.evidence_level,
        notes: request.notes,
    }
}

pub fn convert_to_data_supplement_changes(request: UpdateSupplementRequest) -> data::SupplementChanges {
    data::SupplementChanges {
        name: request.name,
        dose: request.dose,
        time_of_day: request.time_of_day,
        category: request.category,
        mechanism: request.mechanism,
        target: request.target,
        status: request.status,
        evidence_level: request.evidence_level,
        notes: request.notes,
    }
}

pub fn convert_to_domain_goal(row: data::Goal) -> Goal {
    Goal {
        id: row.id,
        user_id: row.user_id,
        name: row.name,
        current_value: row.current_value,
        target_value: row.target_value,
        strategy: row.strategy,
        priority: row.priority,
        status: row.status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub fn convert_to_data_new_goal(request: CreateGoalRequest) -> data::NewGoal {
    data::NewGoal {
        name: request.name.trim().to_string(),
        current_value: request.current_value,
        target_value: request.target_value,
        strategy: request.strategy,
        priority: request.priority,
    }
}

pub fn convert_to_data_goal_changes(request: UpdateGoalRequest) -> data::GoalChanges {
    data::GoalChanges {
        name: request.name,
        current_value: request.current_value,
        target_value: request.target_value,
        strategy: request.strategy,
        priority: request.priority,
        status: request.status,
    }
}

pub fn convert_to_domain_lab_result(row: data::LabResult) -> LabResult {
    LabResult {
        id: row.id,
        user_id: row.user_id,
        test_date: row.test_date,
        lab_name: row.lab_name,
        marker_name: row.marker_name,
        value: row.value,
        unit: row.unit,
        reference_min: row.reference_min,
        reference_max: row.reference_max,
        category: row.category,
        notes: row.notes,
        created_at: row.created_at,
    }
}

pub fn convert_to_data_new_lab_result(request: CreateLabResultRequest) -> data::NewLabResult {
    data::NewLabResult {
        test_date: request.test_date,
        lab_name: request.lab_name,
        marker_name: request.marker_name.trim().to_string(),
        value: request.value,
        unit: request.unit,
        reference_min: request.reference_min,
        reference_max: request.reference_max,
        category: request.category,
        notes: request.notes,
    }
}

pub fn convert_to_data_lab_result_changes(request: UpdateLabResultRequest) -> data::LabResultChanges {
    data::LabResultChanges {
        test_date: request.test_date,
        lab_name: request.lab_name,
        marker_name: request.marker_name,
        value: request.value,
        unit: request.unit,
        reference_min: request.reference_min,
        reference_max: request.reference_max,
        category: request.category,
        notes: request.notes,
    }
}

pub fn convert_to_domain_interaction(row: data::Interaction) -> Interaction {
    Interaction {
        id: row.id,
        supplement_1_id: row.supplement_1_id,
        supplement_2_id: row.supplement_2_id,
        interaction_type: row.interaction_type,
        description: row.description,
        solution: row.solution,
        created_at: row.created_at,
        supplement_1_name: row.supplement_1_name,
        supplement_2_name: row.supplement_2_name,
    }
}

pub fn convert_to_data_new_interaction(request: CreateInteractionRequest) -> data::NewInteraction {
    data::NewInteraction {
        supplement_1_id: request.supplement_1_id,
        supplement_2_id: request.supplement_2_id,
        interaction_type: request.interaction_type,
        description: request.description,
        solution: request.solution,
    }
}

pub fn convert_to_data_interaction_changes(
    request: UpdateInteractionRequest,
) -> data::InteractionChanges {
    data::InteractionChanges {
        interaction_type: request.interaction_type,
        description: request.description,
        solution: request.solution,
    }
}

pub fn convert_to_domain_reminder(row: data::Reminder) -> Reminder {
    Reminder {
        id: row.id,
        user_id: row.user_id,
        reminder_type: row.reminder_type,
        title: row.title,
        description: row.description,
        time: row.time,
        days_of_week: row.days_of_week,
        is_active: row.is_active,
        created_at: row.created_at,
    }
}

pub fn convert_to_data_new_reminder(request: CreateReminderRequest) -> data::NewReminder {
    data::NewReminder {
        reminder_type: request.reminder_type,
        title: request.title.trim().to_string(),
        description: request.description,
        time: request.time,
        days_of_week: request.days_of_week.unwrap_or_default(),
        is_active: request.is_active,
    }
}

pub fn convert_to_data_reminder_changes(request: UpdateReminderRequest) -> data::ReminderChanges {
    data::ReminderChanges {
        reminder_type: request.reminder_type,
        title: request.title,
        description: request.description,
        time: request.time,
        days_of_week: request.days_of_week,
        is_active: request.is_active,
    }
}

pub fn convert_to_domain_cycle(row: data::Cycle) -> Cycle {
    Cycle {
        id: row.id,
        user_id: row.user_id,
        cycle_date: row.cycle_date,
        cycle_type: row.cycle_type,
        verdict: row.verdict,
        input_data: row.input_data,
        rsl_output: row.rsl_output,
        master_curator_output: row.master_curator_output,
        red_team_output: row.red_team_output,
        meta_supervisor_output: row.meta_supervisor_output,
        decisions: row.decisions,
        required_labs: row.required_labs,
        next_review_date: row.next_review_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// The caller supplies the date so a missing `cycle_date` can default to today
pub fn convert_to_data_new_cycle(
    request: CreateCycleRequest,
    default_date: chrono::NaiveDate,
) -> data::NewCycle {
    data::NewCycle {
        cycle_date: request.cycle_date.unwrap_or(default_date),
        cycle_type: request.cycle_type,
        input_data: request.input_data,
        next_review_date: request.next_review_date,
    }
}

pub fn convert_to_data_cycle_changes(request: UpdateCycleRequest) -> data::CycleChanges {
    data::CycleChanges {
        verdict: request.verdict,
        rsl_output: request.rsl_output,
        master_curator_output: request.master_curator_output,
        red_team_output: request.red_team_output,
        meta_supervisor_output: request.meta_supervisor_output,
        decisions: request.decisions,
        required_labs: request.required_labs,
        next_review_date: request.next_review_date,
    }
}

pub fn convert_to_domain_profile(row: data::User) -> Profile {
    Profile {
        id: row.id,
        name: row.name,
        birth_date: row.birth_date,
        height_cm: row.height_cm,
        weight_kg: row.weight_kg,
        body_fat_pct: row.body_fat_pct,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub fn convert_to_data_user_changes(request: UpdateProfileRequest) -> data::UserChanges {
    data::UserChanges {
        name: request.name,
        birth_date: request.birth_date,
        height_cm: request.height_cm,
        weight_kg: request.weight_kg,
        body_fat_pct: request.body_fat_pct,
    }
}
