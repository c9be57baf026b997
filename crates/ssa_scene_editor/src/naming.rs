//! Display names for scripts, events and entities, and list row contents

use ssa_scene_core::{
    Actor, Layer, Object, Performer, SceneEvent, SceneFile, SceneType, ScriptData, Trigger,
    EntityKind, NO_SCRIPT,
};

/// Resolves ids in a scene to human-readable names
pub struct ScriptNames<'a> {
    pub scene_type: SceneType,
    pub scripts: &'a [String],
    pub events: &'a [SceneEvent],
    pub data: &'a ScriptData,
}

impl<'a> ScriptNames<'a> {
    pub fn new(file: &'a SceneFile, data: &'a ScriptData) -> Self {
        Self {
            scene_type: file.scene_type,
            scripts: &file.scripts,
            events: &file.scene.events,
            data,
        }
    }

    /// Name of the talk script an actor, object or event runs
    ///
    /// Acting scenes only own one talk script, so any id above 0 is invalid
    /// there. Enter and sub scenes pick the script whose numeric suffix
    /// matches the id (a suffix that is not a number counts as 0), falling
    /// back to the id as an index.
    pub fn talk_script_name(&self, script_id: i16) -> String {
        if script_id == NO_SCRIPT {
            return "None".to_string();
        }
        if self.scene_type == SceneType::Ssa {
            if self.scripts.is_empty() {
                return "???".to_string();
            }
            if script_id > 0 {
                return format!("?INVALID? {}", script_id);
            }
        } else if let Some(script) = self
            .scripts
            .iter()
            .find(|s| script_suffix_id(s).unwrap_or(0) == script_id)
        {
            return script.clone();
        }
        usize::try_from(script_id)
            .ok()
            .and_then(|idx| self.scripts.get(idx))
            .cloned()
            .unwrap_or_else(|| format!("?INVALID? {}", script_id))
    }

    /// Talk script name of the event a trigger fires
    pub fn event_script_name(&self, event_id: u16) -> String {
        match self.events.get(event_id as usize) {
            Some(event) => self.talk_script_name(event.script_id),
            None => format!("??? {}", event_id),
        }
    }

    /// Two-character label drawn on trigger areas
    pub fn event_script_short_name(&self, event_id: u16) -> String {
        match self.events.get(event_id as usize) {
            Some(event) => script_suffix(&self.talk_script_name(event.script_id)).to_string(),
            None => format!("??? {}", event_id),
        }
    }

    pub fn coroutine_name(&self, routine_id: u16) -> String {
        self.data
            .routine(routine_id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| format!("?INVALID? {}", routine_id))
    }

    pub fn actor_name(&self, actor: &Actor) -> String {
        self.data
            .actor_kind(actor.kind)
            .map(|k| k.name.clone())
            .unwrap_or_else(|| format!("?INVALID? {}", actor.kind))
    }

    pub fn object_name(&self, object: &Object) -> String {
        self.data
            .object_kind(object.kind)
            .map(|k| k.unique_name.clone())
            .unwrap_or_else(|| format!("?INVALID? {}", object.kind))
    }

    pub fn actor_row(&self, layer: usize, index: usize, actor: &Actor) -> Vec<String> {
        vec![
            layer.to_string(),
            index.to_string(),
            self.actor_name(actor),
            self.talk_script_name(actor.script_id),
        ]
    }

    pub fn object_row(&self, layer: usize, index: usize, object: &Object) -> Vec<String> {
        vec![
            layer.to_string(),
            index.to_string(),
            self.object_name(object),
            self.talk_script_name(object.script_id),
        ]
    }

    pub fn performer_row(&self, layer: usize, index: usize, performer: &Performer) -> Vec<String> {
        vec![
            layer.to_string(),
            index.to_string(),
            performer_name(performer),
        ]
    }

    pub fn trigger_row(&self, layer: usize, index: usize, trigger: &Trigger) -> Vec<String> {
        vec![
            layer.to_string(),
            index.to_string(),
            self.event_script_name(trigger.trigger_id),
        ]
    }

    /// Columns of the events panel: coroutine, talk script, unk2, unk3
    pub fn event_row(&self, event: &SceneEvent) -> Vec<String> {
        vec![
            self.coroutine_name(event.coroutine),
            self.talk_script_name(event.script_id),
            event.unk2.to_string(),
            event.unk3.to_string(),
        ]
    }

    /// Label of a trigger id choice: "{talk script} / {coroutine}"
    pub fn trigger_choice_label(&self, event: &SceneEvent) -> String {
        format!(
            "{} / {}",
            self.talk_script_name(event.script_id),
            self.coroutine_name(event.coroutine)
        )
    }
}

pub fn performer_name(performer: &Performer) -> String {
    format!("Type {}", performer.performer_type)
}

/// Characters `[-6..-4]` of a script path: the two-digit number before `.ssb`
pub fn script_suffix(name: &str) -> &str {
    let len = name.chars().count();
    let start = len.saturating_sub(6);
    let end = len.saturating_sub(4);
    let byte_at = |n: usize| name.char_indices().nth(n).map_or(name.len(), |(i, _)| i);
    &name[byte_at(start)..byte_at(end)]
}

/// Numeric suffix of a script path, if it parses
pub fn script_suffix_id(name: &str) -> Option<i16> {
    script_suffix(name).parse().ok()
}

/// File name without directories
pub fn file_short_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Summary of a sector's contents: "empty" or "2 acts, 1 trgs"
pub fn layer_content_summary(layer: &Layer) -> String {
    if layer.is_empty() {
        return "empty".to_string();
    }
    let parts: Vec<String> = [
        (EntityKind::Actor, "acts"),
        (EntityKind::Object, "objs"),
        (EntityKind::Performer, "prfs"),
        (EntityKind::Trigger, "trgs"),
    ]
    .iter()
    .filter_map(|(kind, label)| match layer.count(*kind) {
        0 => None,
        n => Some(format!("{} {}", n, label)),
    })
    .collect();
    parts.join(", ")
}

/// Label of a sector in the layer list
pub fn layer_label(index: usize, layer: &Layer) -> String {
    format!("Sector {} ({})", index, layer_content_summary(layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssa_scene_core::{ActorKind, Routine, ScenePosition};

    fn script_data() -> ScriptData {
        ScriptData {
            level_entities: vec![ActorKind {
                id: 0,
                name: "PLAYER".to_string(),
                entid: 1,
            }],
            routines: vec![Routine {
                id: 3,
                name: "CORO_TALK".to_string(),
            }],
            ..Default::default()
        }
    }

    fn names<'a>(
        scene_type: SceneType,
        scripts: &'a [String],
        events: &'a [SceneEvent],
        data: &'a ScriptData,
    ) -> ScriptNames<'a> {
        ScriptNames {
            scene_type,
            scripts,
            events,
            data,
        }
    }

    #[test]
    fn test_talk_script_in_acting_scene() {
        let data = script_data();
        let scripts = vec!["SCRIPT/D01/m01a0101.ssb".to_string()];
        let n = names(SceneType::Ssa, &scripts, &[], &data);
        assert_eq!(n.talk_script_name(-1), "None");
        assert_eq!(n.talk_script_name(0), "SCRIPT/D01/m01a0101.ssb");
        assert_eq!(n.talk_script_name(2), "?INVALID? 2");
        assert_eq!(n.talk_script_name(-3), "?INVALID? -3");

        let none = names(SceneType::Ssa, &[], &[], &data);
        assert_eq!(none.talk_script_name(0), "???");
        assert_eq!(none.talk_script_name(-1), "None");
    }

    #[test]
    fn test_talk_script_matches_suffix_in_enter_scene() {
        let data = script_data();
        let scripts = vec![
            "SCRIPT/D01/enter00.ssb".to_string(),
            "SCRIPT/D01/enter03.ssb".to_string(),
        ];
        let n = names(SceneType::Sse, &scripts, &[], &data);
        assert_eq!(n.talk_script_name(3), "SCRIPT/D01/enter03.ssb");
        // No suffix 1, so the id is used as an index
        assert_eq!(n.talk_script_name(1), "SCRIPT/D01/enter03.ssb");
        assert_eq!(n.talk_script_name(9), "?INVALID? 9");
    }

    #[test]
    fn test_talk_script_without_number_is_id_zero() {
        let data = script_data();
        let scripts = vec![
            "SCRIPT/D01/enter01.ssb".to_string(),
            "SCRIPT/D01/unionall.ssb".to_string(),
        ];
        let n = names(SceneType::Sse, &scripts, &[], &data);
        assert_eq!(n.talk_script_name(0), "SCRIPT/D01/unionall.ssb");
        assert_eq!(n.talk_script_name(1), "SCRIPT/D01/enter01.ssb");
    }

    #[test]
    fn test_event_script_names() {
        let data = script_data();
        let scripts = vec!["SCRIPT/D01/m01a0101.ssb".to_string()];
        let events = vec![SceneEvent {
            script_id: 0,
            coroutine: 3,
            unk2: 1,
            unk3: 2,
        }];
        let n = names(SceneType::Ssa, &scripts, &events, &data);
        assert_eq!(n.event_script_name(0), "SCRIPT/D01/m01a0101.ssb");
        assert_eq!(n.event_script_short_name(0), "01");
        assert_eq!(n.event_script_name(4), "??? 4");
        assert_eq!(
            n.event_row(&events[0]),
            vec!["CORO_TALK", "SCRIPT/D01/m01a0101.ssb", "1", "2"]
        );
        assert_eq!(n.trigger_choice_label(&events[0]), "SCRIPT/D01/m01a0101.ssb / CORO_TALK");
    }

    #[test]
    fn test_entity_rows() {
        let data = script_data();
        let n = names(SceneType::Ssa, &[], &[], &data);
        let actor = Actor::new(0, ScenePosition::new(1, 1));
        assert_eq!(n.actor_row(2, 5, &actor), vec!["2", "5", "PLAYER", "None"]);
        let unknown = Actor::new(77, ScenePosition::new(1, 1));
        assert_eq!(n.actor_name(&unknown), "?INVALID? 77");
        let performer = Performer::new(4, 1, 1, ScenePosition::new(0, 0));
        assert_eq!(n.performer_row(0, 0, &performer), vec!["0", "0", "Type 4"]);
        let trigger = Trigger::new(1, 1, 1, ScenePosition::new(0, 0));
        assert_eq!(n.trigger_row(1, 0, &trigger), vec!["1", "0", "??? 1"]);
    }

    #[test]
    fn test_script_suffix() {
        assert_eq!(script_suffix("SCRIPT/D01/enter07.ssb"), "07");
        assert_eq!(script_suffix_id("SCRIPT/D01/enter07.ssb"), Some(7));
        assert_eq!(script_suffix("None"), "");
        assert_eq!(script_suffix_id("abcd.ssb"), None);
        assert_eq!(file_short_name("SCRIPT/D01/enter07.ssb"), "enter07.ssb");
    }

    #[test]
    fn test_layer_summary() {
        let mut layer = Layer::new();
        assert_eq!(layer_content_summary(&layer), "empty");
        layer.actors.push(Actor::new(0, ScenePosition::new(0, 0)));
        layer.actors.push(Actor::new(0, ScenePosition::new(1, 0)));
        layer
            .triggers
            .push(Trigger::new(0, 1, 1, ScenePosition::new(0, 0)));
        assert_eq!(layer_content_summary(&layer), "2 acts, 1 trgs");
        assert_eq!(layer_label(3, &layer), "Sector 3 (2 acts, 1 trgs)");
    }
}
