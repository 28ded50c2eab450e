use log::info;

use super::model::{Category, Service, ServiceDraft, ServiceStatus, example_workflow_config};
use crate::store::StoreError;

/// 服務目錄的記憶體儲存：分類與服務兩層。
pub struct CatalogStore {
    categories: Vec<Category>,
    services: Vec<Service>,
    next_service_id: u64,
}

impl CatalogStore {
    pub fn with_seed_data() -> Self {
        let services = seed_services();
        let next_service_id = services.len() as u64 + 1;
        Self {
            categories: seed_categories(),
            services,
            next_service_id,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// 某分類下的服務數量（側欄計數用）。
    pub fn service_count(&self, category_id: &str) -> usize {
        self.services
            .iter()
            .filter(|service| service.category_id == category_id)
            .count()
    }

    /// 分類過濾後的服務索引；`all` 代表不過濾。
    pub fn services_in(&self, category_id: &str) -> Vec<usize> {
        self.services
            .iter()
            .enumerate()
            .filter(|(_, service)| category_id == "all" || service.category_id == category_id)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn service_at(&self, index: usize) -> Option<&Service> {
        self.services.get(index)
    }

    /// 新增分類。識別碼取自代號，重複時拒絕。
    pub fn create_category(
        &mut self,
        name: &str,
        code: &str,
        description: &str,
    ) -> Result<String, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::invalid("请输入目录名称"));
        }
        if code.trim().is_empty() {
            return Err(StoreError::invalid("请输入目录代号"));
        }
        let id = code.trim().to_string();
        if self.category(&id).is_some() {
            return Err(StoreError::invalid("目录代号已存在"));
        }
        self.categories.push(Category {
            id: id.clone(),
            name: name.trim().to_string(),
            code: code.trim().to_string(),
            description: description.trim().to_string(),
            enabled: true,
        });
        info!("category created: {id}");
        Ok(id)
    }

    /// 刪除分類；仍有服務掛在底下時拒絕。
    pub fn remove_category(&mut self, id: &str) -> Result<(), StoreError> {
        if self.service_count(id) > 0 {
            return Err(StoreError::invalid("目录下仍有服务，无法删除"));
        }
        let position = self
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        self.categories.remove(position);
        info!("category removed: {id}");
        Ok(())
    }

    /// 以表單建立服務。新服務先以草稿或上線狀態落地，流程配置先掛
    /// 內建示例，等規範文件解析替換。
    pub fn create_service(&mut self, draft: &ServiceDraft) -> Result<String, StoreError> {
        draft.validate()?;
        if self.category(&draft.category_id).is_none() {
            return Err(StoreError::not_found(&draft.category_id));
        }
        let id = self.next_service_id.to_string();
        self.next_service_id += 1;
        self.services.push(materialize(draft, &id));
        info!("service created: {id}");
        Ok(id)
    }

    pub fn update_service(&mut self, id: &str, draft: &ServiceDraft) -> Result<(), StoreError> {
        draft.validate()?;
        let service = self
            .services
            .iter_mut()
            .find(|service| service.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        let workflow = service.workflow.take();
        let mut updated = materialize(draft, id);
        updated.workflow = workflow;
        *service = updated;
        info!("service updated: {id}");
        Ok(())
    }

    pub fn remove_service(&mut self, id: &str) -> Result<Service, StoreError> {
        let position = self
            .services
            .iter()
            .position(|service| service.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        let removed = self.services.remove(position);
        info!("service removed: {}", removed.title);
        Ok(removed)
    }
}

fn materialize(draft: &ServiceDraft, id: &str) -> Service {
    let sla = draft.sla.trim();
    Service {
        id: id.to_string(),
        title: draft.title.trim().to_string(),
        code: draft.code.trim().to_string(),
        description: draft.description.trim().to_string(),
        status: if draft.enabled {
            ServiceStatus::Active
        } else {
            ServiceStatus::Draft
        },
        sla: if sla.is_empty() {
            String::from("24h")
        } else if sla.ends_with('h') {
            sla.to_string()
        } else {
            format!("{sla}h")
        },
        category_id: draft.category_id.clone(),
        collaboration_rules: draft.collaboration_rules.clone(),
        workflow: None,
    }
}

/// 預置分類，與建立服務抽屜的下拉選單一致。
fn seed_categories() -> Vec<Category> {
    let category = |id: &str, name: &str, code: &str, description: &str| Category {
        id: id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        enabled: true,
    };
    vec![
        category("hr", "人事服务", "hr-services", "在职证明、假期与调岗等人事流程"),
        category("office", "办公支持", "office-support", "日常办公支持类服务"),
        category("assets", "设备与资产", "asset-services", "IT 设备申领与资产管理"),
        category("access", "账号与权限管理", "access-services", "系统账号与权限申请"),
        category("network", "网络", "network-services", "网络接入与 VPN 相关服务"),
        category("email", "邮箱系统", "email-services", "企业邮箱相关服务"),
    ]
}

/// 預置服務。VPN 申請掛上內建的示例流程配置。
fn seed_services() -> Vec<Service> {
    let service = |id: &str,
                   title: &str,
                   code: &str,
                   description: &str,
                   status: ServiceStatus,
                   sla: &str,
                   category_id: &str,
                   rules: &str| Service {
        id: id.to_string(),
        title: title.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        status,
        sla: sla.to_string(),
        category_id: category_id.to_string(),
        collaboration_rules: rules.to_string(),
        workflow: None,
    };

    let mut services = vec![
        service(
            "1",
            "工作证明开具",
            "employment-certificate",
            "开具在职证明、收入证明等相关人事文件",
            ServiceStatus::Active,
            "24h",
            "hr",
            "Phase 1 - 提单: 收集证明用途与收件方式\n\
             Phase 2 - 审核:\n\
             - 核对在职状态\n\
             - 核对薪酬档案\n\
             Phase 3 - 开具: 盖章并通知领取",
        ),
        service(
            "2",
            "请假申请",
            "request-leave",
            "各类假期申请处理",
            ServiceStatus::Active,
            "8h",
            "hr",
            "Phase 1 - 提单: 选择假期类型并填写时长\nPhase 2 - 审批: 直属经理审批",
        ),
        service(
            "3",
            "调岗申请",
            "transfer-request",
            "内部调岗/转岗申请流程",
            ServiceStatus::Active,
            "168h",
            "hr",
            "",
        ),
        service(
            "4",
            "设备领用",
            "equipment-request",
            "IT设备申领流程",
            ServiceStatus::Active,
            "48h",
            "assets",
            "提交设备型号与用途说明\n\n仓库确认库存并安排发放",
        ),
        service(
            "5",
            "权限申请",
            "access-request",
            "系统权限申请与审批",
            ServiceStatus::Draft,
            "4h",
            "access",
            "",
        ),
    ];

    let example = example_workflow_config();
    if let Some(vpn_like) = services.iter_mut().find(|service| service.id == "5") {
        vpn_like.collaboration_rules = example.script.clone();
        vpn_like.workflow = Some(example);
    }
    services
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_counts_match_sidebar() {
        let store = CatalogStore::with_seed_data();
        assert_eq!(store.categories().len(), 6);
        assert_eq!(store.service_count("hr"), 3);
        assert_eq!(store.service_count("assets"), 1);
        assert_eq!(store.service_count("network"), 0);
        assert_eq!(store.services_in("all").len(), 5);
    }

    #[test]
    fn category_with_services_cannot_be_removed() {
        let mut store = CatalogStore::with_seed_data();
        assert!(store.remove_category("hr").is_err());
        assert_eq!(store.remove_category("network"), Ok(()));
        assert_eq!(store.categories().len(), 5);
    }

    #[test]
    fn duplicate_category_code_is_rejected() {
        let mut store = CatalogStore::with_seed_data();
        assert!(store.create_category("重复", "hr", "").is_err());
        let id = store
            .create_category("打印服务", "printing", "打印机相关")
            .expect("fresh code");
        assert_eq!(id, "printing");
    }

    #[test]
    fn service_crud_respects_category_and_keeps_workflow() {
        let mut store = CatalogStore::with_seed_data();
        let mut draft = ServiceDraft {
            category_id: String::from("network"),
            title: String::from("VPN 申请"),
            code: String::from("vpn-request"),
            description: String::from("远程接入权限申请"),
            sla: String::from("8"),
            collaboration_rules: String::new(),
            enabled: true,
        };
        let id = store.create_service(&draft).expect("valid draft");
        assert_eq!(store.service(&id).map(|s| s.sla.as_str()), Some("8h"));

        draft.category_id = String::from("ghost");
        assert!(store.create_service(&draft).is_err());

        // 更新掛了流程配置的服務時，配置應保留。
        let mut vpn_draft =
            ServiceDraft::from_service(store.service("5").expect("seed service"));
        vpn_draft.description = String::from("改描述");
        store.update_service("5", &vpn_draft).expect("update ok");
        let updated = store.service("5").expect("present");
        assert!(updated.workflow.is_some());
        assert_eq!(updated.description, "改描述");

        let removed = store.remove_service(&id).expect("present");
        assert_eq!(removed.title, "VPN 申请");
    }
}
